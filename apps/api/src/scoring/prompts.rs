// Prompt template for ATS evaluation.
//
// The `ATS SCORE: <n> out of 100` line is a contract with scoring::extractor.
// Keep it intact if the wording changes.

use crate::scoring::weights::WeightConfig;

/// Evaluation prompt template.
/// Replace: {skills_matching}, {experience}, {education}, {keyword_usage},
///          {certifications}, {achievements}, {job_stability}, {cultural_fit},
///          {resume_text}, {job_description}
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"Please evaluate the following resume against the job description for ATS compatibility based on the following criteria:

Weights:
1. **Skills Matching** ({skills_matching}%)
2. **Experience** ({experience}%)
3. **Education** ({education}%)
4. **Keyword Usage** ({keyword_usage}%)
5. **Certifications** ({certifications}%)
6. **Achievements** ({achievements}%)
7. **Job Stability** ({job_stability}%)
8. **Cultural Fit** ({cultural_fit}%)

Resume: {resume_text}
Job Description: {job_description}

Please provide:
1. An **ATS compatibility score** out of 100.
2. Specific suggestions on how to improve the resume to close the gap if the score is less than 100%. These suggestions should focus on areas such as skills, experience, keyword usage, certifications, and any other relevant criteria that need attention based on the weights provided.

Do not include section headers like 'Suggestions for Improvement' or labels for each category (e.g., 'Skills Matching'). Only return the feedback.

Use bullet points for each suggestion.

Use the following format:
ATS SCORE: <ATS Score> out of 100

- <Suggestion 1>
- <Suggestion 2>
- <Suggestion 3>
- <Continue providing specific suggestions in bullet point format.>"#;

/// Builds the evaluation prompt for one resume. Deterministic, no validation.
pub fn build_prompt(resume_text: &str, job_description: &str, weights: &WeightConfig) -> String {
    let weighted = EVALUATION_PROMPT_TEMPLATE
        .replace("{skills_matching}", &weights.skills_matching.to_string())
        .replace("{experience}", &weights.experience.to_string())
        .replace("{education}", &weights.education.to_string())
        .replace("{keyword_usage}", &weights.keyword_usage.to_string())
        .replace("{certifications}", &weights.certifications.to_string())
        .replace("{achievements}", &weights.achievements.to_string())
        .replace("{job_stability}", &weights.job_stability.to_string())
        .replace("{cultural_fit}", &weights.cultural_fit.to_string());

    // Both texts are spliced into the template in one pass; neither is rescanned.
    weighted
        .split("{resume_text}")
        .map(|piece| piece.replace("{job_description}", job_description))
        .collect::<Vec<_>>()
        .join(resume_text)
}
