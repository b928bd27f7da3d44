//! Static question templates for each assessment type, and the catalog served
//! by `GET /api/assessment/available`. Question counts in the catalog come
//! from the actual templates so a fully-answered assessment always reaches
//! 100% completion.

use serde::Serialize;

use crate::assessment::models::{AssessmentType, Question};

fn q(id: &str, text: &str, category: &str) -> Question {
    Question {
        question_id: id.to_string(),
        question: text.to_string(),
        category: category.to_string(),
        weight: 1,
    }
}

/// The fixed template table. `Comprehensive` combines all four single-type sets.
pub fn question_set(ty: AssessmentType) -> Vec<Question> {
    match ty {
        AssessmentType::Personality => vec![
            q("p1", "I prefer working in a team rather than alone", "social_preference"),
            q("p2", "I enjoy taking on leadership roles", "leadership"),
            q("p3", "I prefer structured environments with clear rules", "structure_preference"),
            q("p4", "I stay calm under pressure and tight deadlines", "resilience"),
            q("p5", "I enjoy coming up with unconventional ideas", "creativity"),
            q("p6", "I find it easy to start conversations with strangers", "social_preference"),
        ],
        AssessmentType::Skills => vec![
            q("s1", "Rate your proficiency in programming", "technical"),
            q("s2", "How comfortable are you with data analysis?", "analytical"),
            q("s3", "Rate your written communication skills", "communication"),
            q("s4", "How confident are you presenting to a group?", "communication"),
            q("s5", "Rate your ability to plan and organise your own work", "organisation"),
        ],
        AssessmentType::Interests => vec![
            q("i1", "I enjoy solving complex problems", "problem_solving"),
            q("i2", "I like working with technology and digital tools", "technology"),
            q("i3", "I enjoy creating visual designs or written content", "creative"),
            q("i4", "I am curious about how businesses make money", "business"),
            q("i5", "I like helping people work through their difficulties", "helping"),
        ],
        AssessmentType::Aptitude => vec![
            q("a1", "I can quickly understand new concepts", "learning_ability"),
            q("a2", "I have strong mathematical reasoning skills", "mathematical"),
            q("a3", "I can spot patterns in information easily", "pattern_recognition"),
            q("a4", "I can follow multi-step instructions accurately", "attention_to_detail"),
            q("a5", "I can reason about objects rotating in space", "spatial"),
        ],
        AssessmentType::Comprehensive => {
            let mut all = Vec::new();
            for ty in [
                AssessmentType::Personality,
                AssessmentType::Skills,
                AssessmentType::Interests,
                AssessmentType::Aptitude,
            ] {
                all.extend(question_set(ty));
            }
            all
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableAssessment {
    #[serde(rename = "type")]
    pub assessment_type: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub duration: &'static str,
    pub questions: usize,
}

pub fn catalog() -> Vec<AvailableAssessment> {
    let meta: [(AssessmentType, &str, &str, &str); 5] = [
        (
            AssessmentType::Personality,
            "Personality Assessment",
            "Discover your personality traits and work style preferences",
            "10-15 minutes",
        ),
        (
            AssessmentType::Skills,
            "Skills Assessment",
            "Evaluate your current skills and identify areas for improvement",
            "15-20 minutes",
        ),
        (
            AssessmentType::Interests,
            "Interest Assessment",
            "Explore your interests and find matching career paths",
            "10-12 minutes",
        ),
        (
            AssessmentType::Aptitude,
            "Aptitude Assessment",
            "Test your natural abilities and cognitive strengths",
            "20-25 minutes",
        ),
        (
            AssessmentType::Comprehensive,
            "Comprehensive Assessment",
            "Complete evaluation combining all assessment types",
            "45-60 minutes",
        ),
    ];

    meta.into_iter()
        .map(|(ty, title, description, duration)| AvailableAssessment {
            assessment_type: ty.as_str(),
            title,
            description,
            duration,
            questions: question_set(ty).len(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_type_has_questions() {
        for ty in AssessmentType::ALL {
            assert!(!question_set(ty).is_empty(), "{} is empty", ty.as_str());
        }
    }

    #[test]
    fn question_ids_are_unique_within_a_set() {
        for ty in AssessmentType::ALL {
            let set = question_set(ty);
            let ids: HashSet<_> = set.iter().map(|q| q.question_id.as_str()).collect();
            assert_eq!(ids.len(), set.len(), "{} has duplicate ids", ty.as_str());
        }
    }

    #[test]
    fn comprehensive_combines_all_types() {
        let total: usize = [
            AssessmentType::Personality,
            AssessmentType::Skills,
            AssessmentType::Interests,
            AssessmentType::Aptitude,
        ]
        .into_iter()
        .map(|ty| question_set(ty).len())
        .sum();
        assert_eq!(question_set(AssessmentType::Comprehensive).len(), total);
    }

    #[test]
    fn catalog_counts_match_templates() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 5);
        for entry in catalog {
            let ty = AssessmentType::parse(entry.assessment_type).unwrap();
            assert_eq!(entry.questions, question_set(ty).len());
        }
    }
}
