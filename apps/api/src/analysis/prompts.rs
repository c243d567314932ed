// All LLM prompt constants for the Analysis module.
// Each template is filled with `render_prompt` (or `.replace` for the
// single-slot templates) before sending.

/// Basic resume / job match analysis.
/// Replace `{resume_text}` and `{job_description}` before sending.
pub const BASIC_MATCH_PROMPT_TEMPLATE: &str = r#"You are an expert in resume analysis and career coaching.

Please analyze the resume against the job description provided and give detailed feedback on:

1. Match Score (0-100%): How well the candidate's qualifications match the job requirements
2. Strengths: Key strengths and qualifications that align well with the job
3. Gaps: Skills, experiences, or qualifications mentioned in the job description that are missing or not clearly demonstrated in the resume
4. Improvement Suggestions: Specific recommendations for improving the resume to better match this job description
5. Keywords: Important keywords from the job description that should be emphasized in the resume

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

Provide your analysis in a structured format with clear headings and actionable feedback."#;

/// Skill gap analysis with learning resources.
/// Replace `{resume_text}` and `{job_description}` before sending.
pub const SKILL_GAP_PROMPT_TEMPLATE: &str = r#"Analyze the skills mentioned in the job description that are missing from the resume.
For each missing skill:
1. Identify the skill gap
2. Explain its importance for the role
3. Suggest specific online courses, certifications, or resources to develop this skill
4. Estimate the time investment needed to acquire basic proficiency

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}"#;

/// Cover letter generation.
/// Replace `{resume_text}` and `{job_description}` before sending.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Create a professional cover letter based on the candidate's resume and the job description.
The cover letter should:
1. Have a professional greeting and introduction
2. Highlight the most relevant experiences and skills from the resume that match the job
3. Address any potential concerns or gaps identified in the resume analysis
4. Include a compelling closing paragraph
5. Maintain a professional but personalized tone

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}"#;

/// Interview preparation guide.
/// Replace `{resume_text}` and `{job_description}` before sending.
pub const INTERVIEW_PREP_PROMPT_TEMPLATE: &str = r#"Based on this resume and job description, create an interview preparation guide with:
1. 10 likely technical questions specific to this role and the candidate's background
2. 5 behavioral questions that might probe potential gaps in experience
3. Suggested answer frameworks for each question, incorporating the candidate's specific experiences
4. 3 questions the candidate should ask the interviewer

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}"#;

/// Three alternative emphases for the experience section.
/// Replace `{resume_text}` and `{job_description}` before sending.
pub const RESUME_VERSIONS_PROMPT_TEMPLATE: &str = r#"Create 3 different versions of bullet points for the candidate's most recent roles, each emphasizing different aspects:
1. Version focusing on technical skills and achievements
2. Version emphasizing leadership and collaboration
3. Version highlighting business impact and results

For each version, rewrite the experience section to best position the candidate for this specific job.

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}"#;

/// Step one of industry-specific feedback: classify the industry.
/// Replace `{job_description}` before sending. The reply text, trimmed of
/// surrounding whitespace, becomes the label embedded in step two.
pub const INDUSTRY_CLASSIFY_PROMPT_TEMPLATE: &str = r#"Based on this job description, identify the specific industry and role category (e.g., 'Tech - Software Engineering',
'Finance - Investment Banking', 'Healthcare - Nursing'). Return only the category name.

JOB DESCRIPTION:
{job_description}"#;

/// Step two of industry-specific feedback.
/// Replace `{industry}`, `{resume_text}`, and `{job_description}` before sending.
pub const INDUSTRY_FEEDBACK_PROMPT_TEMPLATE: &str = r#"Provide industry-specific resume feedback for a {industry} position.
Include:
1. Industry-specific conventions and expectations for resumes in this field
2. Key certifications or credentials that are valued but missing
3. Industry jargon or technical terms that should be included
4. Format and presentation norms for this specific industry

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}"#;

/// Follow-up chat prompt. Re-embeds the full resume and job text plus the
/// question — prior turns are never fed back to the model.
/// Replace `{question}`, `{resume_text}`, and `{job_description}` before sending.
pub const FOLLOW_UP_PROMPT_TEMPLATE: &str = r#"Based on the previous resume analysis and the user's question: "{question}"

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

Provide a helpful, specific response to their question."#;
