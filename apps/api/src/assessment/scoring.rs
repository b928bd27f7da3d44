//! Result projector — turns a completed assessment's question/response pairs
//! into the structured results document.
//!
//! Deterministic and pure: the same (type, questions, responses) always yields
//! the same results, so a richer scorer can replace this one without touching
//! the orchestrator. Answers are normalized to a 0–100 scale (Likert numbers,
//! agreement phrases, proficiency words), averaged per question category with
//! question weights, and every section of the results is derived from those
//! category scores.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::assessment::models::{
    AptitudeScore, AssessmentResults, AssessmentType, CareerMatch, InterestScore, LearningStyle,
    PersonalityTrait, Question, ResponseEntry, SkillGapEntry, WorkStyle,
};

const SKILL_LEVELS: [&str; 4] = ["beginner", "intermediate", "advanced", "expert"];

/// Normalizes one answer to 0–100. Unrecognized answers score a neutral 50.
pub fn answer_score(answer: &Value) -> f64 {
    match answer {
        Value::Number(n) => {
            let n = n.as_f64().unwrap_or(0.0);
            if n <= 5.0 {
                // Likert 1-5
                (n.clamp(0.0, 5.0) / 5.0) * 100.0
            } else {
                n.clamp(0.0, 100.0)
            }
        }
        Value::Bool(true) => 100.0,
        Value::Bool(false) => 0.0,
        Value::String(s) => match s.to_lowercase().trim() {
            "strongly agree" | "always" | "expert" => 100.0,
            "agree" | "often" | "advanced" => 75.0,
            "neutral" | "sometimes" | "intermediate" => 50.0,
            "disagree" | "rarely" | "beginner" => 25.0,
            "strongly disagree" | "never" | "no experience" => 0.0,
            _ => 50.0,
        },
        _ => 50.0,
    }
}

/// Weighted average score per question category, rounded to whole points.
/// Unanswered questions do not contribute.
pub fn category_scores(questions: &[Question], responses: &[ResponseEntry]) -> BTreeMap<String, u32> {
    let mut sums: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for response in responses {
        let Some(question) = questions
            .iter()
            .find(|q| q.question_id == response.question_id)
        else {
            continue;
        };
        let weight = question.weight.max(1) as f64;
        let entry = sums.entry(question.category.clone()).or_insert((0.0, 0.0));
        entry.0 += answer_score(&response.answer) * weight;
        entry.1 += weight;
    }
    sums.into_iter()
        .map(|(category, (total, weight))| (category, (total / weight).round() as u32))
        .collect()
}

fn display_name(category: &str) -> String {
    category
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn personality_type_for(category: &str) -> &'static str {
    match category {
        "leadership" => "Leader",
        "social_preference" => "Collaborative",
        "structure_preference" => "Methodical",
        "creativity" | "creative" => "Creative",
        "resilience" => "Resilient",
        _ => "Analytical",
    }
}

fn related_careers_for(category: &str) -> Vec<String> {
    let careers: &[&str] = match category {
        "technology" | "technical" => &["Software Engineer", "Data Scientist"],
        "analytical" | "problem_solving" | "mathematical" => &["Data Analyst", "Research Analyst"],
        "creative" | "creativity" => &["UX Designer", "Content Strategist"],
        "business" => &["Product Manager", "Business Analyst"],
        "helping" => &["Counsellor", "Teacher"],
        "communication" => &["Marketing Executive", "Public Relations Specialist"],
        _ => &["Software Engineer", "Business Analyst"],
    };
    careers.iter().map(|c| c.to_string()).collect()
}

fn level_for_score(score: u32) -> &'static str {
    match score {
        0..=29 => "beginner",
        30..=59 => "intermediate",
        60..=84 => "advanced",
        _ => "expert",
    }
}

fn next_level(level: &str) -> &'static str {
    match SKILL_LEVELS.iter().position(|l| *l == level) {
        Some(i) if i + 1 < SKILL_LEVELS.len() => SKILL_LEVELS[i + 1],
        _ => "expert",
    }
}

fn next_steps_for(ty: AssessmentType) -> Vec<String> {
    let steps: &[&str] = match ty {
        AssessmentType::Personality => &[
            "Reflect on roles that match your personality type",
            "Discuss your results with a mentor or counsellor",
        ],
        AssessmentType::Skills => &[
            "Pick one skill gap and start a structured course",
            "Build a small project to practise your strongest skill",
        ],
        AssessmentType::Interests => &[
            "Explore career paths aligned with your top interest area",
            "Talk to professionals working in those fields",
        ],
        AssessmentType::Aptitude => &[
            "Practise in your strongest aptitude area with timed exercises",
            "Consider careers that reward your top aptitudes",
        ],
        AssessmentType::Comprehensive => &[
            "Review your career recommendations and shortlist two paths",
            "Request a personalized learning path for your top choice",
            "Retake the assessment after six months to track growth",
        ],
    };
    steps.iter().map(|s| s.to_string()).collect()
}

/// Projects a completed assessment into the structured results document.
pub fn project_results(
    ty: AssessmentType,
    questions: &[Question],
    responses: &[ResponseEntry],
) -> AssessmentResults {
    let scores = category_scores(questions, responses);
    let overall: u32 = if scores.is_empty() {
        50
    } else {
        scores.values().sum::<u32>() / scores.len() as u32
    };

    // Highest-scoring category drives the headline personality type.
    let top_category = scores
        .iter()
        .max_by_key(|(_, score)| **score)
        .map(|(category, _)| category.clone())
        .unwrap_or_else(|| "analytical".to_string());

    let personality_traits: Vec<PersonalityTrait> = scores
        .iter()
        .map(|(category, score)| PersonalityTrait {
            name: display_name(category),
            score: *score,
            description: format!("Scored {score} across {} responses", display_name(category).to_lowercase()),
        })
        .collect();

    let skills_profile: Vec<SkillGapEntry> = scores
        .iter()
        .filter(|(category, _)| {
            matches!(
                category.as_str(),
                "technical" | "analytical" | "communication" | "organisation"
            )
        })
        .map(|(category, score)| {
            let current = level_for_score(*score);
            SkillGapEntry {
                skill: display_name(category),
                current_level: current.to_string(),
                potential_level: next_level(current).to_string(),
                gap: format!("Practise {} through regular projects", display_name(category).to_lowercase()),
            }
        })
        .collect();

    let interests_profile: Vec<InterestScore> = scores
        .iter()
        .map(|(category, score)| InterestScore {
            category: display_name(category),
            score: *score,
            related_careers: related_careers_for(category),
        })
        .collect();

    let aptitudes: Vec<AptitudeScore> = scores
        .iter()
        .map(|(category, score)| AptitudeScore {
            area: display_name(category),
            score: *score,
            percentile: (*score + 5).min(99),
        })
        .collect();

    let learning_style = if overall >= 70 {
        LearningStyle {
            primary: "Visual".to_string(),
            secondary: "Reading/Writing".to_string(),
            characteristics: vec![
                "Prefers diagrams and charts".to_string(),
                "Retains material from structured notes".to_string(),
            ],
        }
    } else {
        LearningStyle {
            primary: "Kinesthetic".to_string(),
            secondary: "Visual".to_string(),
            characteristics: vec![
                "Learns by doing".to_string(),
                "Benefits from worked examples".to_string(),
            ],
        }
    };

    let collaborative = scores
        .get("social_preference")
        .or_else(|| scores.get("communication"))
        .copied()
        .unwrap_or(overall);
    let work_style = if collaborative >= 60 {
        WorkStyle {
            preferred: "Collaborative".to_string(),
            characteristics: vec![
                "Works well in teams".to_string(),
                "Enjoys brainstorming".to_string(),
            ],
            environment: "Open office".to_string(),
        }
    } else {
        WorkStyle {
            preferred: "Independent".to_string(),
            characteristics: vec![
                "Focuses deeply when working alone".to_string(),
                "Prefers written over verbal coordination".to_string(),
            ],
            environment: "Quiet workspace".to_string(),
        }
    };

    let career_recommendations: Vec<CareerMatch> = related_careers_for(&top_category)
        .into_iter()
        .enumerate()
        .map(|(i, career)| CareerMatch {
            career,
            match_score: overall.saturating_sub(4 * i as u32).min(99),
            reasoning: format!(
                "Strong showing in {} relative to other areas",
                display_name(&top_category).to_lowercase()
            ),
            required_skills: vec![display_name(&top_category), "Problem Solving".to_string()],
            growth_potential: "High".to_string(),
        })
        .collect();

    let mut strengths: Vec<String> = scores
        .iter()
        .filter(|(_, score)| **score >= 70)
        .map(|(category, _)| display_name(category))
        .collect();
    if strengths.is_empty() {
        strengths.push(display_name(&top_category));
    }

    let mut areas_for_improvement: Vec<String> = scores
        .iter()
        .filter(|(_, score)| **score < 50)
        .map(|(category, _)| display_name(category))
        .collect();
    if areas_for_improvement.is_empty() {
        if let Some((category, _)) = scores.iter().min_by_key(|(_, score)| **score) {
            if *category != top_category {
                areas_for_improvement.push(display_name(category));
            }
        }
    }

    AssessmentResults {
        personality_type: personality_type_for(&top_category).to_string(),
        personality_traits,
        skills_profile,
        interests_profile,
        aptitudes,
        learning_style,
        work_style,
        career_recommendations,
        strengths,
        areas_for_improvement,
        next_steps: next_steps_for(ty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn question(id: &str, category: &str) -> Question {
        Question {
            question_id: id.into(),
            question: "q".into(),
            category: category.into(),
            weight: 1,
        }
    }

    fn response(id: &str, answer: Value) -> ResponseEntry {
        ResponseEntry {
            question_id: id.into(),
            answer,
            score: None,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn likert_numbers_normalize() {
        assert_eq!(answer_score(&json!(5)), 100.0);
        assert_eq!(answer_score(&json!(0)), 0.0);
        assert_eq!(answer_score(&json!(85)), 85.0);
    }

    #[test]
    fn agreement_phrases_normalize() {
        assert_eq!(answer_score(&json!("Strongly Agree")), 100.0);
        assert_eq!(answer_score(&json!("disagree")), 25.0);
        assert_eq!(answer_score(&json!("something else")), 50.0);
    }

    #[test]
    fn category_scores_ignore_unanswered_questions() {
        let questions = vec![question("q1", "technical"), question("q2", "technical")];
        let responses = vec![response("q1", json!(5))];
        let scores = category_scores(&questions, &responses);
        assert_eq!(scores["technical"], 100);
    }

    #[test]
    fn projection_is_deterministic() {
        let questions = vec![question("q1", "leadership"), question("q2", "technical")];
        let responses = vec![response("q1", json!(5)), response("q2", json!(2))];
        let a = project_results(AssessmentType::Personality, &questions, &responses);
        let b = project_results(AssessmentType::Personality, &questions, &responses);
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
    }

    #[test]
    fn projection_depends_on_answers() {
        let questions = vec![question("q1", "leadership"), question("q2", "technical")];
        let leader = project_results(
            AssessmentType::Personality,
            &questions,
            &[response("q1", json!(5)), response("q2", json!(1))],
        );
        let analytical = project_results(
            AssessmentType::Personality,
            &questions,
            &[response("q1", json!(1)), response("q2", json!(5))],
        );
        assert_eq!(leader.personality_type, "Leader");
        assert_eq!(analytical.personality_type, "Analytical");
    }

    #[test]
    fn results_sections_are_populated() {
        let questions = vec![
            question("q1", "technical"),
            question("q2", "social_preference"),
            question("q3", "mathematical"),
        ];
        let responses = vec![
            response("q1", json!(4)),
            response("q2", json!("agree")),
            response("q3", json!(3)),
        ];
        let results = project_results(AssessmentType::Comprehensive, &questions, &responses);
        assert!(!results.personality_traits.is_empty());
        assert!(!results.interests_profile.is_empty());
        assert!(!results.aptitudes.is_empty());
        assert!(!results.career_recommendations.is_empty());
        assert!(!results.strengths.is_empty());
        assert!(!results.next_steps.is_empty());
    }

    #[test]
    fn weak_categories_become_improvement_areas() {
        let questions = vec![question("q1", "leadership"), question("q2", "communication")];
        let responses = vec![response("q1", json!(5)), response("q2", json!(1))];
        let results = project_results(AssessmentType::Skills, &questions, &responses);
        assert!(results
            .areas_for_improvement
            .contains(&"Communication".to_string()));
        assert!(results.strengths.contains(&"Leadership".to_string()));
    }
}
