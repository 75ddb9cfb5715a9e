use serde::{Deserialize, Serialize};

use super::domain::{AssessmentKind, Category};
use super::ranking::{RankedResult, Ranking};

/// Static descriptive metadata attached to a category for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    pub category: Category,
    pub title: String,
    pub description: String,
    pub subjects: Vec<String>,
    pub career_paths: Vec<String>,
    pub strengths: Vec<String>,
    pub challenges: Vec<String>,
    pub salary_range: String,
    pub study_duration: String,
    pub institutions: Vec<String>,
}

/// A ranked result joined with its display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub result: RankedResult,
    pub record: RecommendationRecord,
}

/// Raised only when the shipped reference data is incomplete; this is
/// a configuration fault checked at service construction, not a
/// runtime condition.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("no recommendation record for category '{}'", .0.label())]
    MissingCategory(Category),
}

/// Immutable reference table keyed by category.
#[derive(Debug, Clone)]
pub struct RecommendationCatalog {
    records: Vec<RecommendationRecord>,
}

impl RecommendationCatalog {
    pub fn new(records: Vec<RecommendationRecord>) -> Self {
        Self { records }
    }

    pub fn record(&self, category: Category) -> Option<&RecommendationRecord> {
        self.records
            .iter()
            .find(|record| record.category == category)
    }

    /// Load-time invariant: every category a variant declares must
    /// have a record.
    pub fn validate(&self, kind: AssessmentKind) -> Result<(), CatalogError> {
        for category in kind.categories() {
            if self.record(*category).is_none() {
                return Err(CatalogError::MissingCategory(*category));
            }
        }
        Ok(())
    }

    /// Attach metadata to each ranked result, preserving order.
    pub fn enrich(&self, ranking: &Ranking) -> Result<Vec<Recommendation>, CatalogError> {
        ranking
            .results
            .iter()
            .map(|result| {
                let record = self
                    .record(result.category)
                    .ok_or(CatalogError::MissingCategory(result.category))?;
                Ok(Recommendation {
                    result: result.clone(),
                    record: record.clone(),
                })
            })
            .collect()
    }

    /// The reference data shipped with the crate, covering every
    /// category of both assessment variants.
    pub fn standard() -> Self {
        Self::new(vec![
            record(
                Category::Science,
                "Science Stream",
                "A foundation in physics, chemistry and mathematics or biology, \
                 leading to engineering, medicine, research and analytical careers.",
                &["Physics", "Chemistry", "Mathematics", "Biology"],
                &["Research Scientist", "Data Analyst", "Engineer", "Doctor"],
                &["Analytical thinking", "Wide range of degree options"],
                &["Heavy syllabus", "Competitive entrance exams"],
                "INR 4-25 LPA depending on specialisation",
                "3-5 years undergraduate, longer with postgraduate study",
                &["IISc Bangalore", "IISER Pune", "St. Stephen's College"],
            ),
            record(
                Category::Commerce,
                "Commerce Stream",
                "Accountancy, business studies and economics, preparing for \
                 finance, taxation, audit and corporate roles.",
                &["Accountancy", "Business Studies", "Economics", "Mathematics"],
                &["Chartered Accountant", "Investment Banker", "Company Secretary", "Financial Analyst"],
                &["Strong employability", "Clear professional ladders (CA/CS/CFA)"],
                &["Professional exams have low pass rates"],
                "INR 3-20 LPA depending on qualification",
                "3 years undergraduate plus professional certification",
                &["SRCC Delhi", "NMIMS Mumbai", "Christ University"],
            ),
            record(
                Category::Arts,
                "Arts and Humanities",
                "Literature, history, political science and languages, opening \
                 paths into law, journalism, civil services and academia.",
                &["History", "Political Science", "English", "Psychology"],
                &["Lawyer", "Journalist", "Civil Servant", "Teacher"],
                &["Flexible subject combinations", "Strong fit for UPSC aspirants"],
                &["Early salaries can be modest"],
                "INR 2.5-15 LPA depending on path",
                "3 years undergraduate, professional courses vary",
                &["Lady Shri Ram College", "JNU Delhi", "Ashoka University"],
            ),
            record(
                Category::Diploma,
                "Diploma and Vocational",
                "Job-oriented technical programmes that reach the workplace \
                 fastest, with lateral entry into degree courses later.",
                &["Applied Mathematics", "Workshop Practice", "Technical Drawing"],
                &["Junior Engineer", "CNC Technician", "Electrician", "Lab Assistant"],
                &["Earn early", "Practical, hands-on curriculum"],
                &["May need a degree later for senior roles"],
                "INR 2-8 LPA",
                "1-3 years depending on the programme",
                &["Government Polytechnic Mumbai", "PUSA Polytechnic Delhi", "ITI programmes"],
            ),
            record(
                Category::Engineering,
                "Engineering and Technology",
                "Designing and building systems, from software and electronics \
                 to civil infrastructure and robotics.",
                &["Mathematics", "Physics", "Computer Science"],
                &["Software Engineer", "Mechanical Engineer", "Data Engineer", "Robotics Engineer"],
                &["High demand", "Global mobility", "Strong starting salaries"],
                &["JEE-level competition", "Continuous upskilling expected"],
                "INR 6-30 LPA",
                "4 years B.Tech/B.E.",
                &["IIT Bombay", "IIT Delhi", "NIT Trichy", "BITS Pilani"],
            ),
            record(
                Category::Medical,
                "Medicine and Health Sciences",
                "Clinical practice, allied health and life-science research \
                 careers centred on patient care.",
                &["Biology", "Chemistry", "Physics"],
                &["Doctor (MBBS)", "Dentist", "Physiotherapist", "Biomedical Researcher"],
                &["Respected, stable profession", "Directly improves lives"],
                &["NEET competition", "Long training period"],
                "INR 5-25 LPA after specialisation",
                "5.5 years MBBS plus postgraduate specialisation",
                &["AIIMS Delhi", "CMC Vellore", "JIPMER Puducherry"],
            ),
            record(
                Category::Creative,
                "Creative and Design",
                "Design, media production, fine arts and performance, where \
                 portfolios matter as much as degrees.",
                &["Fine Arts", "Design Fundamentals", "Media Studies"],
                &["UX Designer", "Film Maker", "Animator", "Writer"],
                &["Portfolio-driven entry", "Growing digital demand"],
                &["Income varies early in the career"],
                "INR 3-18 LPA",
                "3-4 years undergraduate or portfolio route",
                &["NID Ahmedabad", "NIFT Delhi", "FTII Pune"],
            ),
            record(
                Category::Business,
                "Business and Management",
                "Entrepreneurship, marketing, operations and leadership roles \
                 across industries.",
                &["Business Studies", "Economics", "Statistics"],
                &["Entrepreneur", "Product Manager", "Marketing Manager", "Consultant"],
                &["Wide industry applicability", "Leadership trajectory"],
                &["Top outcomes often need an MBA"],
                "INR 4-28 LPA",
                "3 years BBA plus 2 years MBA typically",
                &["IIM Indore IPM", "Shaheed Sukhdev College", "Symbiosis Pune"],
            ),
            record(
                Category::Social,
                "Social Sciences and Public Service",
                "Teaching, social work, policy and administration focused on \
                 communities and institutions.",
                &["Sociology", "Political Science", "Psychology", "Education"],
                &["Civil Servant", "Teacher", "Social Worker", "Policy Analyst"],
                &["High social impact", "Stable public-sector roles"],
                &["Competitive public examinations"],
                "INR 3-15 LPA",
                "3 years undergraduate plus B.Ed or services preparation",
                &["TISS Mumbai", "Delhi University", "Azim Premji University"],
            ),
        ])
    }
}

#[allow(clippy::too_many_arguments)]
fn record(
    category: Category,
    title: &str,
    description: &str,
    subjects: &[&str],
    career_paths: &[&str],
    strengths: &[&str],
    challenges: &[&str],
    salary_range: &str,
    study_duration: &str,
    institutions: &[&str],
) -> RecommendationRecord {
    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    RecommendationRecord {
        category,
        title: title.to_string(),
        description: description.to_string(),
        subjects: owned(subjects),
        career_paths: owned(career_paths),
        strengths: owned(strengths),
        challenges: owned(challenges),
        salary_range: salary_range.to_string(),
        study_duration: study_duration.to_string(),
        institutions: owned(institutions),
    }
}
