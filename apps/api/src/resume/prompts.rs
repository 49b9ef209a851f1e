// Prompt constants for structured resume extraction.

/// System prompt for resume parsing. Append `JSON_OBJECT_ONLY`.
pub const RESUME_PARSE_SYSTEM: &str = "You are a strict ATS resume parser. \
    You copy facts out of resumes into a fixed JSON schema and never add to them.";

/// Resume parsing prompt. Replace `{explicit_only}` and `{resume_text}` before sending.
pub const RESUME_PARSE_PROMPT_TEMPLATE: &str = r#"{explicit_only}

Parse the resume below into the schema at the end of this message.

GENERAL RULES:
1. Missing values are "" for text fields and [] for lists.
2. Never repeat an entry and never duplicate a section.

SECTIONS:
- "SKILLS", "KEY COMPETENCIES", "CORE SKILLS" and similar headings are skills.
- "EXPERIENCE", "WORK EXPERIENCE", "PROFESSIONAL EXPERIENCE" and similar headings are experience.

EDUCATION:
- One entry per qualification listed.
- Set "is_highest" to true only for the highest degree among those named.
- "year_passed" is copied exactly: a single year stays a year, a range such as
  "2025 - 2029" stays the full range string. Never split, complete, or reformat it.
- Never invent results or percentages.

EXPERIENCE:
- One entry per role, in the order the resume lists them. Separate roles at the
  same company are separate entries.
- "end_date" is "Present" only when the resume says so.
- Projects belong only to the role they are written under.
- Leave "last_pay_rate", "pay_uom" and "last_hike_date" empty unless stated.

SKILLS:
- One entry per skill or tool; never group unrelated tools into one entry.
- "skillset_type" only when the resume labels it (e.g. "Technical", "Soft Skills").
- "years" and "last_used" only when written next to the skill.

ADDRESSES:
- Only locations written as an address or place of residence.
- Leave "start_date_active" and "end_date_active" empty unless stated.

SCHEMA (return exactly this shape):
{
  "education": [
    {"degree": "", "subject": "", "year_passed": "", "result": "",
     "college_university": "", "percentage": "", "is_highest": false}
  ],
  "experience": [
    {"organization": "", "job_title": "", "location": "", "start_date": "",
     "end_date": "", "last_pay_rate": "", "pay_uom": "", "last_hike_date": "",
     "projects": [{"project_name": "", "project_details": ""}]}
  ],
  "skills": [
    {"skillset_type": "", "skill_name": "", "years": "", "last_used": ""}
  ],
  "addresses": [
    {"address": "", "start_date_active": "", "end_date_active": ""}
  ]
}

RESUME TEXT:
{resume_text}"#;
