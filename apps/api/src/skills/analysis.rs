//! Deterministic skill helpers: recommendations from catalog frequency,
//! roadmaps, and the short self-assessment quiz.

use std::collections::HashMap;

use serde::Serialize;

use crate::career::models::CareerPathRow;
use crate::profile::models::Skill;

pub const LEVELS: &[&str] = &["beginner", "intermediate", "advanced", "expert"];

pub const TIME_COMMITMENTS: &[&str] = &["1-2 hours", "3-5 hours", "6-8 hours", "full-time"];

pub const BUDGETS: &[&str] = &["free", "low", "medium", "high"];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRecommendation {
    pub skill: String,
    pub demand: usize,
    pub careers: Vec<String>,
}

/// Ranks catalog skills the user does not already hold by how many matching
/// careers ask for them. Top ten only.
pub fn recommend_skills(careers: &[CareerPathRow], held: &[Skill]) -> Vec<SkillRecommendation> {
    let mut demand: HashMap<&str, Vec<&str>> = HashMap::new();
    for career in careers {
        for skill in &career.skills.0.technical {
            if held.iter().any(|h| h.name.eq_ignore_ascii_case(&skill.skill)) {
                continue;
            }
            demand
                .entry(skill.skill.as_str())
                .or_default()
                .push(career.title.as_str());
        }
    }

    let mut ranked: Vec<SkillRecommendation> = demand
        .into_iter()
        .map(|(skill, careers)| SkillRecommendation {
            skill: skill.to_string(),
            demand: careers.len(),
            careers: careers.iter().map(|c| c.to_string()).collect(),
        })
        .collect();
    ranked.sort_by(|a, b| b.demand.cmp(&a.demand).then(a.skill.cmp(&b.skill)));
    ranked.truncate(10);
    ranked
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapStage {
    pub level: String,
    pub focus: String,
    pub duration: String,
    pub milestones: Vec<String>,
}

pub fn next_level(level: &str) -> Option<&'static str> {
    let idx = LEVELS.iter().position(|l| *l == level)?;
    LEVELS.get(idx + 1).copied()
}

/// Stages from the user's current level up to expert.
pub fn skill_roadmap(skill: &str, current_level: &str) -> Vec<RoadmapStage> {
    let start = LEVELS
        .iter()
        .position(|l| *l == current_level)
        .unwrap_or(0);

    LEVELS[start + 1..]
        .iter()
        .map(|level| RoadmapStage {
            level: level.to_string(),
            focus: match *level {
                "intermediate" => format!("Apply {skill} in small real projects"),
                "advanced" => format!("Take ownership of {skill}-heavy work end to end"),
                _ => format!("Mentor others and contribute to the {skill} community"),
            },
            duration: match *level {
                "intermediate" => "2-3 months".to_string(),
                "advanced" => "4-6 months".to_string(),
                _ => "6-12 months".to_string(),
            },
            milestones: vec![
                format!("Complete a structured {level}-level course in {skill}"),
                format!("Build a portfolio piece demonstrating {level} {skill}"),
            ],
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question_id: String,
    pub question: String,
}

/// Seven yes/no questions; the yes-count maps to a level band.
pub fn quiz_questions(skill: &str) -> Vec<QuizQuestion> {
    let prompts = [
        format!("Have you used {skill} in any project, however small?"),
        format!("Can you explain the core concepts of {skill} to a beginner?"),
        format!("Have you used {skill} in academic or work deliverables?"),
        format!("Can you debug unfamiliar problems in {skill} on your own?"),
        format!("Have others asked you for help with {skill}?"),
        format!("Have you worked with advanced or niche areas of {skill}?"),
        format!("Could you teach a structured course on {skill}?"),
    ];
    prompts
        .into_iter()
        .enumerate()
        .map(|(i, question)| QuizQuestion {
            question_id: format!("q{}", i + 1),
            question,
        })
        .collect()
}

/// yes-count 0-2 beginner, 3-4 intermediate, 5-6 advanced, 7 expert.
pub fn level_for_yes_count(yes: usize) -> &'static str {
    match yes {
        0..=2 => "beginner",
        3..=4 => "intermediate",
        5..=6 => "advanced",
        _ => "expert",
    }
}

pub fn recommendations_for_level(skill: &str, level: &str) -> Vec<String> {
    match level {
        "beginner" => vec![
            format!("Start with a free introductory {skill} course on NPTEL or freeCodeCamp"),
            format!("Practice {skill} for 30 minutes daily with guided exercises"),
            "Join a study group or online community for accountability".to_string(),
        ],
        "intermediate" => vec![
            format!("Build two complete projects that lean on {skill}"),
            format!("Read production-grade code or material that uses {skill}"),
            "Seek feedback from practitioners on your work".to_string(),
        ],
        "advanced" => vec![
            format!("Contribute to open source or community work involving {skill}"),
            format!("Pursue a recognized certification in {skill}"),
            "Mentor a beginner; teaching exposes gaps".to_string(),
        ],
        _ => vec![
            format!("Publish articles or talks about {skill}"),
            "Track emerging developments and evaluate them hands-on".to_string(),
        ],
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingSkill {
    pub skill: String,
    pub category: String,
    pub why: String,
}

pub fn trending_skills() -> Vec<TrendingSkill> {
    let entries = [
        ("Python", "technical", "In demand across software, data and automation roles"),
        ("Machine Learning", "technical", "Rapid adoption across Indian IT services and startups"),
        ("Cloud Computing", "technical", "Migration to AWS, Azure and GCP keeps hiring strong"),
        ("Data Science", "analytical", "Analytics teams are growing in every major industry"),
        ("React", "technical", "The most requested frontend framework in Indian job listings"),
        ("DevOps", "technical", "CI/CD and infrastructure automation skills command a premium"),
    ];
    entries
        .into_iter()
        .map(|(skill, category, why)| TrendingSkill {
            skill: skill.to_string(),
            category: category.to_string(),
            why: why.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::career::models::{
        CareerSkills, EducationRequirements, ExperienceBands, GrowthProspects, RegionalContext,
        TechnicalSkill, WorkEnvironmentInfo,
    };
    use chrono::Utc;
    use sqlx::types::Json as Db;
    use uuid::Uuid;

    fn career(title: &str, skills: &[&str]) -> CareerPathRow {
        let now = Utc::now();
        CareerPathRow {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: String::new(),
            industry: "technology".to_string(),
            category: "engineering".to_string(),
            education_requirements: Db(EducationRequirements::default()),
            skills: Db(CareerSkills {
                technical: skills
                    .iter()
                    .map(|s| TechnicalSkill {
                        skill: s.to_string(),
                        importance: "high".to_string(),
                        level: None,
                    })
                    .collect(),
                ..CareerSkills::default()
            }),
            experience: Db(ExperienceBands::default()),
            growth_prospects: Db(GrowthProspects::default()),
            work_environment: Db(WorkEnvironmentInfo::default()),
            certifications: Db(Vec::new()),
            learning_path: Db(Vec::new()),
            regional_context: Db(RegionalContext::default()),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn held(name: &str) -> Skill {
        Skill {
            name: name.to_string(),
            level: "intermediate".to_string(),
            category: "technical".to_string(),
        }
    }

    #[test]
    fn recommendations_rank_by_demand_and_skip_held() {
        let careers = vec![
            career("Software Developer", &["Python", "SQL"]),
            career("Data Analyst", &["Python", "Excel"]),
            career("ML Engineer", &["Python", "SQL"]),
        ];
        let out = recommend_skills(&careers, &[held("Excel")]);
        assert_eq!(out[0].skill, "Python");
        assert_eq!(out[0].demand, 3);
        assert_eq!(out[1].skill, "SQL");
        assert!(out.iter().all(|r| r.skill != "Excel"));
    }

    #[test]
    fn held_comparison_is_case_insensitive() {
        let careers = vec![career("A", &["python"])];
        let out = recommend_skills(&careers, &[held("Python")]);
        assert!(out.is_empty());
    }

    #[test]
    fn roadmap_starts_above_current_level() {
        let stages = skill_roadmap("Python", "intermediate");
        assert_eq!(stages.len(), 2);
        assert_eq!(stages[0].level, "advanced");
        assert_eq!(stages[1].level, "expert");
    }

    #[test]
    fn roadmap_for_expert_is_empty() {
        assert!(skill_roadmap("Python", "expert").is_empty());
    }

    #[test]
    fn quiz_yes_counts_map_to_levels() {
        assert_eq!(level_for_yes_count(0), "beginner");
        assert_eq!(level_for_yes_count(2), "beginner");
        assert_eq!(level_for_yes_count(3), "intermediate");
        assert_eq!(level_for_yes_count(5), "advanced");
        assert_eq!(level_for_yes_count(7), "expert");
    }

    #[test]
    fn quiz_has_seven_questions_with_stable_ids() {
        let questions = quiz_questions("SQL");
        assert_eq!(questions.len(), 7);
        assert_eq!(questions[0].question_id, "q1");
        assert_eq!(questions[6].question_id, "q7");
    }

    #[test]
    fn next_level_walks_the_ladder() {
        assert_eq!(next_level("beginner"), Some("intermediate"));
        assert_eq!(next_level("expert"), None);
        assert_eq!(next_level("nonsense"), None);
    }
}
