// Prompt templates for the six agents. Placeholders are filled with
// `llm_client::prompts::render`; every prompt ends with JSON_ONLY_INSTRUCTION.

/// Replace: {job_description}, {resume_text}, {good_fit_threshold}
pub const RESUME_PROMPT_TEMPLATE: &str = r#"Analyze this resume against the job description.

Job Description:
{job_description}

Resume:
{resume_text}

Return a JSON object with the following fields:
- name: candidate's full name
- contact_info: email or phone number
- experience_summary: a brief summary of total experience
- match_score: integer score out of 100
- is_good_fit: true if match_score >= {good_fit_threshold}, else false
- strengths: list of key strengths
- weaknesses: list of areas for improvement
- missing_keywords: list of important keywords missing
- score_breakdown: object mapping sub-score names to numbers
- detailed_report: full analysis narrative"#;

/// Replace: {current_date}, {content}, {formatted_sources}
pub const NEWS_PROMPT_TEMPLATE: &str = r#"**Current Date:** {current_date}
**News Content:**
{content}

**Sources Found:**
{formatted_sources}

**Analysis Instructions:**
1. Determine if the news is authentic based SOLELY on the sources above
2. Set 'is_fake' to TRUE ONLY if the news is fabricated or disproven by evidence
3. Set 'is_fake' to FALSE if the news is confirmed by sources
4. Provide confidence percentage (0-100) based on source consistency
5. List specific reasons with source references
6. Extract related entities (people/orgs/locations)
7. Rate source credibility (0-100) based on domain authority
8. List supporting evidence URLs
9. Focus on current events - assume today is {current_date}
10. For sports/news events:
    - Prioritize sports/news domains
    - Verify dates and locations
    - Check for consistent reporting across sources

**Key Definition:**
- is_fake = True → News is fabricated/inaccurate
- is_fake = False → News is authentic/accurate"#;

pub const NEWS_SPORTS_ADDENDUM: &str = "**Sports News Context:**\n\
    Verify using sports-specific domains. Recent matches might have limited coverage. \
    Focus on official team/league sites when available.";

pub const NO_SOURCES: &str = "No sources available";

/// Replace: {language}, {code}
pub const CODE_PROMPT_TEMPLATE: &str = r#"Analyze this {language} code for bugs, security issues, optimizations, and complexity.
Return JSON with:
- overall_score: int (0-100)
- bugs: list of {description, severity, line_number, fix_suggestion}
- optimizations: list of str
- security_issues: list of str
- complexity_analysis: object of named metrics
Code:
{code}"#;

/// Replace: {question}, {document}
pub const DOCUMENT_QA_PROMPT_TEMPLATE: &str = r#"Answer this question based EXCLUSIVELY on the provided document content.
If the answer isn't found, state that clearly.

Question: {question}
Document Content: {document}

Format your response with:
- Direct answer in the answer field
- Confidence percentage (0-100)
- Up to 3 relevant excerpts from the document as sources
- 2-3 suggested follow-up questions"#;

/// Replace: {tone}, {language}, {purpose}, {key_points}
pub const EMAIL_PROMPT_TEMPLATE: &str = r#"Generate a professional email with these requirements:
- Tone: {tone}
- Language: {language}
- Purpose: {purpose}
- Key points: {key_points}

Also rate the draft's tone_score and clarity_score from 0 to 10."#;

/// Replace: {attendees}, {duration}, {purpose}, {timezone}
pub const MEETING_PROMPT_TEMPLATE: &str = r#"Create a meeting proposal with:
- Attendees: {attendees}
- Duration: {duration} minutes
- Purpose: {purpose}
- Timezone: {timezone}"#;
