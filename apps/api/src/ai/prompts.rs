//! Prompt builders for the AI adapter. Each interpolates profile/assessment
//! fields into a natural-language instruction that demands a JSON-only reply.

use chrono::Utc;

use crate::ai::{AssessmentContext, LearningPathSeed};
use crate::career::models::CareerSkills;
use crate::profile::models::{ProfileRow, Skill};

fn age_of(profile: &ProfileRow) -> u32 {
    Utc::now()
        .date_naive()
        .years_since(profile.date_of_birth)
        .unwrap_or(0)
}

fn json_block<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

pub fn career_recommendation_prompt(profile: &ProfileRow) -> String {
    let summary = &profile.assessment_results.0;
    let interests = profile
        .interests
        .0
        .iter()
        .map(|i| i.category.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let skills = profile
        .skills
        .0
        .iter()
        .map(|s| format!("{} ({})", s.name, s.level))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"You are an expert career advisor specializing in the Indian job market. Analyze the following user profile and assessment results to provide personalized career recommendations.

User Profile:
- Name: {name}
- Age: {age}
- Education: {level} in {stream}
- Location: {city}, {state}
- Interests: {interests}
- Current Skills: {skills}

Assessment Results:
- Personality Type: {personality}
- Learning Style: {learning}
- Work Style: {work}
- Strengths: {strengths}
- Areas for Improvement: {improvements}

Provide the top 5 career recommendations with match scores (1-100), reasoning, required skills, growth potential in the Indian market, salary expectations and next steps.

Respond with valid JSON only, using this structure:
{{
  "recommendations": [
    {{
      "career": "Career Name",
      "matchScore": 85,
      "reasoning": "Detailed reasoning",
      "requiredSkills": ["skill1", "skill2"],
      "growthPotential": "High/Medium/Low",
      "salaryRange": {{"min": 300000, "max": 800000, "currency": "INR"}},
      "nextSteps": ["step1", "step2"]
    }}
  ],
  "summary": "Overall career guidance summary"
}}"#,
        name = profile.name,
        age = age_of(profile),
        level = profile.education.0.current_level,
        stream = profile.education.0.stream.as_deref().unwrap_or("general"),
        city = profile.location_city,
        state = profile.location_state,
        interests = interests,
        skills = skills,
        personality = summary.personality_type.as_deref().unwrap_or("unknown"),
        learning = summary.learning_style.as_deref().unwrap_or("unknown"),
        work = summary.work_style.as_deref().unwrap_or("unknown"),
        strengths = summary.strengths.join(", "),
        improvements = summary.areas_for_improvement.join(", "),
    )
}

pub fn skills_gap_prompt(user_skills: &[Skill], career_requirements: &CareerSkills) -> String {
    format!(
        r#"Analyze the skills gap between the user's current skills and career requirements.

User Skills:
{user_skills}

Career Requirements:
{requirements}

Identify skills the user already has, critical missing skills, skills that need improvement, learning priorities and an estimated time to acquire the missing skills.

Respond with valid JSON only:
{{
  "currentSkills": [{{"skill": "name", "level": "proficiency"}}],
  "missingSkills": [{{"skill": "name", "priority": "high/medium/low", "timeToLearn": "estimate"}}],
  "skillsToImprove": [{{"skill": "name", "currentLevel": "level", "targetLevel": "level"}}],
  "learningPriorities": ["skill1", "skill2"],
  "timeline": "Overall timeline estimate"
}}"#,
        user_skills = json_block(&user_skills),
        requirements = json_block(career_requirements),
    )
}

pub fn learning_path_prompt(
    profile: &ProfileRow,
    career_goal: &str,
    seed: &LearningPathSeed,
) -> String {
    format!(
        r#"Create a personalized learning path for an Indian student to achieve their career goal.

User Profile:
- Education Level: {level}
- Learning Style: {learning}
- Available Time: {time}
- Budget: {budget} (prefer free/low-cost options)

Career Goal: {career_goal}
Skills Gap:
{seed}

Create a phase-wise path (Beginner, Intermediate, Advanced) with specific courses (prefer Indian platforms), practical projects, certifications, and a timeline per phase.

Respond with valid JSON only:
{{
  "phases": [
    {{
      "name": "Phase Name",
      "duration": "X months",
      "skills": ["skill1", "skill2"],
      "courses": [{{"name": "course", "platform": "platform", "cost": "free/paid"}}],
      "projects": ["project1", "project2"],
      "milestones": ["milestone1", "milestone2"]
    }}
  ],
  "totalDuration": "X months",
  "estimatedCost": "amount",
  "certifications": [{{"name": "cert", "provider": "provider"}}]
}}"#,
        level = profile.education.0.current_level,
        learning = profile
            .assessment_results
            .0
            .learning_style
            .as_deref()
            .unwrap_or("unknown"),
        time = seed.time_commitment.as_deref().unwrap_or("2-3 hours daily"),
        budget = seed.budget.as_deref().unwrap_or("low"),
        career_goal = career_goal,
        seed = json_block(seed),
    )
}

pub fn assessment_analysis_prompt(ctx: &AssessmentContext<'_>) -> String {
    format!(
        r#"Analyze the comprehensive assessment results and provide detailed insights.

Assessment Data:
{data}

Cover the personality profile, skills results, interest alignment with careers, aptitude strengths and weaknesses, learning style recommendations, work environment preferences and career compatibility.

Respond with valid JSON only:
{{
  "personalityAnalysis": "Detailed analysis",
  "skillsAnalysis": "Skills assessment insights",
  "interestAnalysis": "Interest-based insights",
  "aptitudeAnalysis": "Aptitude insights",
  "learningRecommendations": ["rec1", "rec2"],
  "workStyleInsights": "Work style analysis",
  "careerCompatibility": "Overall compatibility analysis"
}}"#,
        data = json_block(ctx),
    )
}

pub fn market_insights_prompt(industry: &str, location: &str) -> String {
    format!(
        r#"Provide current market insights for the {industry} industry in {location}, India.

Include job market trends, salary benchmarks, skill demands, growth opportunities, challenges and risks, the outlook for the next 2-3 years, top companies hiring, and emerging roles.

Respond with valid JSON only:
{{
  "marketTrends": ["trend1", "trend2"],
  "salaryBenchmarks": {{"entry": "range", "mid": "range", "senior": "range"}},
  "skillDemands": ["skill1", "skill2"],
  "growthOpportunities": ["opp1", "opp2"],
  "challenges": ["challenge1", "challenge2"],
  "futureOutlook": "outlook description",
  "topCompanies": ["company1", "company2"],
  "emergingRoles": ["role1", "role2"]
}}"#
    )
}
