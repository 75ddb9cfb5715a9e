use crate::infra::{default_scoring_config, parse_kind};
use chrono::Local;
use clap::Args;
use std::sync::Arc;

use mentor_ai::assessments::{
    Answer, AnswerSheet, AssessmentKind, AssessmentReport, AssessmentService,
    InMemoryProfileStore, Question, QuestionBank, QuestionInput, StudentProfile,
};
use mentor_ai::error::AppError;

#[derive(Args, Debug)]
pub(crate) struct QuestionsArgs {
    /// Assessment variant: 'stream' or 'career'
    #[arg(long, default_value = "stream", value_parser = parse_kind)]
    pub(crate) kind: AssessmentKind,
    /// Declared stream used to resolve conditional questions
    #[arg(long)]
    pub(crate) stream: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Assessment variant: 'stream' or 'career'
    #[arg(long, default_value = "career", value_parser = parse_kind)]
    pub(crate) kind: AssessmentKind,
    /// Declared stream recorded on the demo profile (e.g. "Science (PCM)")
    #[arg(long)]
    pub(crate) stream: Option<String>,
    /// Skip the demo profile so the assessment runs without signals
    #[arg(long)]
    pub(crate) anonymous: bool,
}

pub(crate) fn run_questions(args: QuestionsArgs) -> Result<(), AppError> {
    let bank = QuestionBank::for_kind(args.kind);

    let profile = args.stream.map(|stream| demo_profile(args.kind, Some(stream)));
    let applicable = bank.applicable(profile.as_ref(), &AnswerSheet::new());

    match profile.as_ref().and_then(|profile| profile.stream.as_deref()) {
        Some(stream) => println!(
            "{} assessment questions for declared stream '{}'",
            args.kind.label(),
            stream
        ),
        None => println!("{} assessment questions (no declared stream)", args.kind.label()),
    }
    for question in applicable {
        println!("\n[{}] {}", question.topic, question.prompt);
        println!("  id: {}", question.id);
        match &question.input {
            QuestionInput::SingleChoice { options } => {
                for option in options {
                    println!("  - {} ({})", option.text, option.id);
                }
            }
            QuestionInput::SubjectMarks { subjects } => {
                println!("  subject marks required: {}", subjects.join(", "));
            }
        }
    }
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        kind,
        stream,
        anonymous,
    } = args;

    println!("Guidance assessment demo ({})", kind.label());

    let store = Arc::new(InMemoryProfileStore::new());
    let service = build_service(store)?;

    if !anonymous {
        let profile = demo_profile(kind, stream);
        println!(
            "Profile: {} ({}, stream {})",
            profile.name,
            profile.education_level,
            profile.stream.as_deref().unwrap_or("undeclared")
        );
        service.save_profile(profile)?;
    } else {
        println!("Profile: none (anonymous run)");
    }

    let session = service.start(kind);
    println!("Session {} started\n", session.session_id);

    while let Some(question) = service.current_question(&session.session_id)? {
        let answer = scripted_answer(&question);
        describe_answer(&question, &answer);
        let progress = service.submit_answer(&session.session_id, question.id.clone(), answer)?;
        println!("  progress: {}/{}", progress.answered, progress.total);
    }

    let report = service.results(&session.session_id).await?;
    render_report(&report);
    Ok(())
}

fn build_service(
    store: Arc<InMemoryProfileStore>,
) -> Result<AssessmentService<InMemoryProfileStore>, AppError> {
    AssessmentService::new(store, default_scoring_config())
        .map_err(mentor_ai::assessments::ServiceError::from)
        .map_err(AppError::from)
}

fn demo_profile(kind: AssessmentKind, stream: Option<String>) -> StudentProfile {
    let (education_level, default_stream) = match kind {
        AssessmentKind::Stream => ("class-10", None),
        AssessmentKind::Career => ("class-12", Some("Science (PCM)".to_string())),
    };

    StudentProfile {
        student_id: "demo-student".to_string(),
        name: "Demo Student".to_string(),
        education_level: education_level.to_string(),
        stream: stream.or(default_stream),
        interests: vec!["coding".to_string(), "design".to_string()],
        goals: vec!["become an engineer".to_string()],
        updated_on: Local::now().date_naive(),
    }
}

/// Deterministic script: the first option for choices, solid marks for
/// the marks question.
fn scripted_answer(question: &Question) -> Answer {
    match &question.input {
        QuestionInput::SingleChoice { options } => Answer::Choice {
            option: options[0].id.clone(),
        },
        QuestionInput::SubjectMarks { subjects } => {
            let marks: std::collections::BTreeMap<&str, f64> = subjects
                .iter()
                .map(|subject| (subject.as_str(), 82.0))
                .collect();
            Answer::Marks {
                payload: serde_json::to_string(&marks).unwrap_or_else(|_| "{}".to_string()),
            }
        }
    }
}

fn describe_answer(question: &Question, answer: &Answer) {
    println!("Q: {}", question.prompt);
    match answer {
        Answer::Choice { option } => println!("  answered: {option}"),
        Answer::Marks { payload } => println!("  answered: {payload}"),
    }
}

fn render_report(report: &AssessmentReport) {
    println!(
        "\nReport for session {} ({} assessment)",
        report.session_id,
        report.kind.label()
    );
    println!("Confidence: {}", report.confidence.label());

    for recommendation in &report.recommendations {
        let result = &recommendation.result;
        let record = &recommendation.record;
        println!(
            "\n#{} {} | score {:.1} | {}% of top | {}% of total",
            result.position,
            record.title,
            result.score,
            result.percent_of_max,
            result.percent_of_total
        );
        println!("  {}", record.description);
        println!("  careers: {}", record.career_paths.join(", "));
        println!("  study duration: {}", record.study_duration);
        println!("  salary range: {}", record.salary_range);
        println!("  institutions: {}", record.institutions.join(", "));
    }
}
