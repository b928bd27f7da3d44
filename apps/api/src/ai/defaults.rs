//! Static fallback payloads served when no model is configured or a call
//! fails. Shapes match what the live operations parse, so callers never
//! branch on the degraded flag for structure.

use crate::ai::{
    AssessmentAnalysis, CareerRecommendation, CareerRecommendations, Course, LearningPath,
    LearningPhase, MarketInsights, MissingSkill, SalaryBenchmarks, SkillsGapAnalysis,
};
use crate::profile::models::SalaryExpectation;

pub fn assessment_analysis() -> AssessmentAnalysis {
    AssessmentAnalysis {
        personality_analysis:
            "Automated analysis is unavailable right now; your structured results below are complete."
                .to_string(),
        skills_analysis: "Review your skills profile for current and potential levels.".to_string(),
        interest_analysis: "Your interest scores point to the career areas listed in your results."
            .to_string(),
        aptitude_analysis: "Aptitude scores and percentiles are included in your results."
            .to_string(),
        learning_recommendations: vec![
            "Revisit your weakest category with a short structured course".to_string(),
            "Practise your strongest category through a small project".to_string(),
        ],
        work_style_insights: "See the work style section of your structured results.".to_string(),
        career_compatibility:
            "The career recommendations in your results are ranked by category fit.".to_string(),
    }
}

pub fn career_recommendations() -> CareerRecommendations {
    CareerRecommendations {
        recommendations: vec![
            CareerRecommendation {
                career: "Software Developer".to_string(),
                match_score: 85,
                reasoning: "Based on your technical interests and problem-solving skills"
                    .to_string(),
                required_skills: vec![
                    "Programming skills".to_string(),
                    "Problem solving".to_string(),
                    "Team collaboration".to_string(),
                ],
                growth_potential: "High".to_string(),
                salary_range: Some(SalaryExpectation {
                    min: 400_000,
                    max: 1_200_000,
                    currency: "INR".to_string(),
                }),
                next_steps: vec![
                    "Take programming courses".to_string(),
                    "Build a portfolio project".to_string(),
                ],
            },
            CareerRecommendation {
                career: "Data Analyst".to_string(),
                match_score: 80,
                reasoning: "Suitable for analytical and detail-oriented individuals".to_string(),
                required_skills: vec![
                    "Analytical skills".to_string(),
                    "Statistical knowledge".to_string(),
                    "Communication".to_string(),
                ],
                growth_potential: "High".to_string(),
                salary_range: Some(SalaryExpectation {
                    min: 300_000,
                    max: 800_000,
                    currency: "INR".to_string(),
                }),
                next_steps: vec![
                    "Learn spreadsheet and SQL basics".to_string(),
                    "Analyse a public dataset end to end".to_string(),
                ],
            },
        ],
        summary: "Basic recommendations based on common career paths for students with your profile."
            .to_string(),
    }
}

pub fn skills_gap() -> SkillsGapAnalysis {
    SkillsGapAnalysis {
        current_skills: vec![],
        missing_skills: vec![MissingSkill {
            skill: "Programming".to_string(),
            priority: "high".to_string(),
            time_to_learn: "3-6 months".to_string(),
        }],
        skills_to_improve: vec![],
        learning_priorities: vec!["Programming".to_string()],
        timeline: "Focus on building practical projects and gaining hands-on experience"
            .to_string(),
    }
}

pub fn learning_path() -> LearningPath {
    LearningPath {
        phases: vec![
            LearningPhase {
                name: "Foundation".to_string(),
                duration: "3-6 months".to_string(),
                skills: vec!["Basic Programming".to_string(), "Mathematics for CS".to_string()],
                courses: vec![Course {
                    name: "Basic Programming".to_string(),
                    platform: "NPTEL".to_string(),
                    cost: "free".to_string(),
                }],
                projects: vec!["Simple calculator".to_string(), "Basic web page".to_string()],
                milestones: vec!["Finish one course with a certificate".to_string()],
            },
            LearningPhase {
                name: "Intermediate".to_string(),
                duration: "6-12 months".to_string(),
                skills: vec!["Data Structures".to_string(), "Web Development".to_string()],
                courses: vec![Course {
                    name: "Web Development".to_string(),
                    platform: "freeCodeCamp".to_string(),
                    cost: "free".to_string(),
                }],
                projects: vec![
                    "Personal portfolio".to_string(),
                    "Small web application".to_string(),
                ],
                milestones: vec!["Deploy one project publicly".to_string()],
            },
        ],
        total_duration: "12-18 months".to_string(),
        estimated_cost: "Free to moderate".to_string(),
        certifications: vec![],
    }
}

pub fn market_insights(industry: &str) -> MarketInsights {
    MarketInsights {
        market_trends: vec![
            format!("Steady hiring demand across the {industry} sector"),
            "Growing preference for hybrid work".to_string(),
        ],
        salary_benchmarks: SalaryBenchmarks {
            entry: "₹3-6 LPA".to_string(),
            mid: "₹6-15 LPA".to_string(),
            senior: "₹15-35 LPA".to_string(),
        },
        skill_demands: vec![
            "Domain fundamentals".to_string(),
            "Communication".to_string(),
            "Data literacy".to_string(),
        ],
        growth_opportunities: vec!["Tier-2 city expansion".to_string()],
        challenges: vec!["High competition for entry-level roles".to_string()],
        future_outlook: "Moderate growth expected over the next 2-3 years; live market data \
                         is unavailable without an AI connection."
            .to_string(),
        top_companies: vec![],
        emerging_roles: vec![],
    }
}
