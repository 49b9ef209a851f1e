// Prompt constants for JD skill extraction and resume/JD skill matching.
// Cross-cutting fragments live in llm_client::prompts.

/// System prompt for JD skill extraction. Append `JSON_ARRAY_ONLY`.
pub const JD_SKILLS_SYSTEM: &str = "You are a precise job description analyst. \
    You list the skills a job description explicitly names and nothing else.";

/// JD skill extraction prompt. Replace `{explicit_only}` and `{jd_text}` before sending.
pub const JD_SKILLS_PROMPT_TEMPLATE: &str = r#"{explicit_only}

Extract every skill, technology, tool, platform, methodology, or professional
competency that the job description below names explicitly.

WHERE TO LOOK:
- Labelled sections such as "Technology Scope", "Required Skills", "Key Responsibilities",
  "Qualifications", "Must Have", "Nice to Have".
- Unlabelled narrative paragraphs, bullet lists, and tables copied as text.

RULES:
1. Include a term ONLY if the text names it. Never infer a skill from a related phrase:
   "daily stand-ups" does NOT yield "Agile"; "cloud migration" does NOT yield "AWS".
2. When both a full name and an abbreviation appear, return BOTH as separate entries:
   "Microsoft System Center Configuration Manager (SCCM)" yields
   "Microsoft System Center Configuration Manager" and "SCCM".
3. One skill per entry. Split lists like "Python/Java" into "Python" and "Java".
4. Keep each term short: the skill name only, without years or proficiency words.

Return a JSON array of strings, for example:
["Python", "AWS", "Microsoft SCCM", "SCCM", "Project Management"]

JOB DESCRIPTION:
{jd_text}"#;

/// System prompt for skill matching. Append `JSON_ARRAY_ONLY`.
pub const SKILL_MATCH_SYSTEM: &str = "You are a strict ATS skill matcher. \
    You decide which resume skills satisfy a job's required skills, \
    and you prefer missing a match over making a wrong one.";

/// Skill matching prompt. Replace `{jd_skills_json}` and `{resume_skills_json}` before sending.
pub const SKILL_MATCH_PROMPT_TEMPLATE: &str = r#"Compare the RESUME SKILLS against the JOB SKILLS.
A resume skill MATCHES when it satisfies at least one job skill under these rules,
checked in order and always case-insensitively:

1. EXACT: the terms are equal. "aws" matches "AWS".
2. VARIANT: the resume skill names a specific version, edition, or closely related
   product that shares the job skill as its root.
   - job "python" matches resume "Python 3"
   - job "sql" matches resume "MySQL" or "PostgreSQL"
   - job "vmware horizon" matches resume "VMware" or "VMware VDI"
3. SEMANTIC: the terms are near-synonyms in professional vocabulary.
   - job "project management" matches resume "Program Management"
   - job "process improvements" matches resume "Process Optimization"
4. UNCERTAIN: if you are not confident a rule applies, it is NOT a match.
   False negatives are acceptable; false positives are not.

OUTPUT RULES:
- Return ONLY resume skills that match.
- Copy each matched resume skill EXACTLY as it appears in RESUME SKILLS,
  same spelling, same casing, no paraphrasing.
- Never return a job skill or any string absent from RESUME SKILLS.

JOB SKILLS:
{jd_skills_json}

RESUME SKILLS:
{resume_skills_json}

Return a JSON array of the matched resume skills, for example: ["Python 3", "AWS"]"#;
