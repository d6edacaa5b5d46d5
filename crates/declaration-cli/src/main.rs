mod wizard;

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use declaration_spec::{
    Answer, DetailContext, DetailKind, Event, FamilyMember, FieldSpec, FormState, Question,
    Registry, answer_top_question, apply, build_snapshot, clear_member_selections,
    registry_schema, render_json, render_text, reset_all, save_detail_text, save_followup_answer,
    select_disorder_option, select_family_disease, select_family_disorder_option,
    select_member_option, state_schema, toggle_disorder, toggle_member, try_submit,
};
use wizard::{PromptContext, Verbosity, WizardPresenter, parse_choice, parse_yes_no};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Health declaration wizard CLI",
    long_about = "Fills, validates, and replays health declaration sessions against the built-in questionnaire registry"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RenderMode {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum SchemaKind {
    State,
    Registry,
}

#[derive(Subcommand)]
enum Command {
    /// Fill the declaration in an interactive text shell.
    Wizard {
        /// JSON file with a previously saved state to resume from.
        #[arg(long, value_name = "STATE")]
        state: Option<PathBuf>,
        /// Where to write the final state as JSON.
        #[arg(long, value_name = "OUT")]
        out: Option<PathBuf>,
        /// Custom registry JSON overriding the built-in questionnaire.
        #[arg(long, value_name = "REGISTRY")]
        registry: Option<PathBuf>,
        /// Answer every top-level question with "no" and finish.
        #[arg(long)]
        auto_no: bool,
        /// Show verbose output (statuses, disclosed sections, parse expectations).
        #[arg(long, alias = "debug")]
        verbose: bool,
        /// Also emit the collected state as pretty JSON.
        #[arg(long)]
        answers_json: bool,
    },
    /// Check that every top-level question is answered.
    Validate {
        /// Path to the state JSON file.
        #[arg(long, value_name = "STATE")]
        state: PathBuf,
        /// Custom registry JSON overriding the built-in questionnaire.
        #[arg(long, value_name = "REGISTRY")]
        registry: Option<PathBuf>,
    },
    /// Replay a JSON event script onto a state file.
    Apply {
        /// State to start from; a fresh empty state when omitted.
        #[arg(long, value_name = "STATE")]
        state: Option<PathBuf>,
        /// JSON array of events to replay, in order.
        #[arg(long, value_name = "EVENTS")]
        events: PathBuf,
        /// Where to write the resulting state; stdout when omitted.
        #[arg(long, value_name = "OUT")]
        out: Option<PathBuf>,
        /// Custom registry JSON overriding the built-in questionnaire.
        #[arg(long, value_name = "REGISTRY")]
        registry: Option<PathBuf>,
    },
    /// Render the snapshot the presentation layer would consume.
    Show {
        /// Path to the state JSON file.
        #[arg(long, value_name = "STATE")]
        state: PathBuf,
        /// Render output mode.
        #[arg(long, value_enum, default_value_t = RenderMode::Text)]
        format: RenderMode,
        /// Custom registry JSON overriding the built-in questionnaire.
        #[arg(long, value_name = "REGISTRY")]
        registry: Option<PathBuf>,
    },
    /// Drop all member selections and details, keeping the top-level answers.
    Clear {
        /// Path to the state JSON file.
        #[arg(long, value_name = "STATE")]
        state: PathBuf,
        /// Where to write the cleared state; the input file when omitted.
        #[arg(long, value_name = "OUT")]
        out: Option<PathBuf>,
    },
    /// Print the JSON schema of state or registry files.
    Schema {
        #[arg(long, value_enum, default_value_t = SchemaKind::State)]
        kind: SchemaKind,
    },
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Wizard {
            state,
            out,
            registry,
            auto_no,
            verbose,
            answers_json,
        } => run_wizard(state, out, registry, auto_no, verbose, answers_json),
        Command::Validate { state, registry } => run_validate(state, registry),
        Command::Apply {
            state,
            events,
            out,
            registry,
        } => run_apply(state, events, out, registry),
        Command::Show {
            state,
            format,
            registry,
        } => run_show(state, format, registry),
        Command::Clear { state, out } => run_clear(state, out),
        Command::Schema { kind } => run_schema(kind),
    }
}

fn run_wizard(
    state_path: Option<PathBuf>,
    out: Option<PathBuf>,
    registry_path: Option<PathBuf>,
    auto_no: bool,
    verbose: bool,
    answers_json: bool,
) -> CliResult<()> {
    let registry = load_registry(registry_path)?;
    let mut state = load_state(state_path.as_ref())?;
    let mut presenter = WizardPresenter::new(Verbosity::from_verbose(verbose), answers_json);
    presenter.show_header(&registry);

    if auto_no {
        reset_all(&registry, &mut state);
    } else {
        for question in &registry.questions {
            let answered_yes = prompt_yes_no(&presenter, question.prompt.as_str())?;
            let answer = if answered_yes { Answer::Yes } else { Answer::No };
            answer_top_question(&registry, &mut state, question.id, answer);
            if answered_yes && question.members {
                for member in &registry.members {
                    let include = prompt_yes_no(
                        &presenter,
                        format!("לכלול את {} ({})?", member.display_name, member.relation),
                    )?;
                    toggle_member(&registry, &mut state, question.id, &member.id, include);
                    if include {
                        fill_member_section(&registry, &mut state, &presenter, question, member)?;
                    }
                }
            }
            presenter.show_status(&build_snapshot(&registry, &state));
        }
    }

    try_submit(&registry, &state)?;
    presenter.show_completion(&state);
    if let Some(out) = out {
        write_state(&out, &state)?;
    }
    Ok(())
}

fn fill_member_section(
    registry: &Registry,
    state: &mut FormState,
    presenter: &WizardPresenter,
    question: &Question,
    member: &FamilyMember,
) -> CliResult<()> {
    match &question.detail {
        DetailKind::Disorders => {
            for disorder in &registry.disorders {
                let selected = prompt_yes_no(
                    presenter,
                    format!("האם אובחנה {}?", disorder.display_name),
                )?;
                toggle_disorder(registry, state, &member.id, &disorder.id, selected);
                if !selected {
                    continue;
                }
                let context = DetailContext::Disorder(disorder.id.clone());
                for field in &disorder.fields {
                    let option = prompt_option(presenter, field)?;
                    select_disorder_option(
                        registry, state, &member.id, &disorder.id, &field.key, &option, true,
                    );
                    if field.reveals(&option) {
                        let text = prompt_text(presenter, "פירוט:")?;
                        if !text.is_empty() {
                            save_detail_text(
                                registry, state, &member.id, &context, &field.key, text,
                            );
                        }
                    }
                }
            }
        }
        DetailKind::FamilyHistory => {
            for disease in &registry.diseases {
                let selected =
                    prompt_yes_no(presenter, format!("האם קיימת {}?", disease.display_name))?;
                select_family_disease(registry, state, &member.id, &disease.id, selected);
            }
            for category in &registry.categories {
                let context = DetailContext::Family(category.id.clone());
                let gate_option = prompt_option(presenter, &category.gate)?;
                select_family_disorder_option(
                    registry,
                    state,
                    &member.id,
                    &category.id,
                    &category.gate.key,
                    &gate_option,
                    true,
                );
                if !category.gate.reveals(&gate_option) {
                    continue;
                }
                for field in &category.sub_fields {
                    let option = prompt_option(presenter, field)?;
                    select_family_disorder_option(
                        registry,
                        state,
                        &member.id,
                        &category.id,
                        &field.key,
                        &option,
                        true,
                    );
                    if field.reveals(&option) {
                        let text = prompt_text(presenter, "פירוט:")?;
                        if !text.is_empty() {
                            save_detail_text(
                                registry, state, &member.id, &context, &field.key, text,
                            );
                        }
                    }
                }
            }
            let followup_open = registry
                .trigger_diseases()
                .any(|disease| state.has_disease(&member.id, &disease.id));
            if followup_open {
                for field in &registry.followup.fields {
                    let value = prompt_text(presenter, field.title.as_str())?;
                    if !value.is_empty() {
                        save_followup_answer(registry, state, &member.id, &field.key, value);
                    }
                }
            }
        }
        DetailKind::Simple { fields } => {
            let context = DetailContext::Question(question.id);
            for field in fields {
                let option = prompt_option(presenter, field)?;
                select_member_option(
                    registry, state, question.id, &member.id, &field.key, &option, true,
                );
                if field.reveals(&option) {
                    let text = prompt_text(presenter, "פירוט:")?;
                    if !text.is_empty() {
                        save_detail_text(registry, state, &member.id, &context, &field.key, text);
                    }
                }
            }
        }
    }
    Ok(())
}

fn run_validate(state_path: PathBuf, registry_path: Option<PathBuf>) -> CliResult<()> {
    let registry = load_registry(registry_path)?;
    let state = load_state(Some(&state_path))?;
    match try_submit(&registry, &state) {
        Ok(()) => {
            println!(
                "Declaration is complete; all {} questions answered.",
                registry.questions.len()
            );
            Ok(())
        }
        Err(error) => {
            eprintln!("{}", error);
            std::process::exit(1);
        }
    }
}

fn run_apply(
    state_path: Option<PathBuf>,
    events_path: PathBuf,
    out: Option<PathBuf>,
    registry_path: Option<PathBuf>,
) -> CliResult<()> {
    let registry = load_registry(registry_path)?;
    let mut state = load_state(state_path.as_ref())?;
    let raw = fs::read_to_string(resolve_state_path(events_path))?;
    let events: Vec<Event> = serde_json::from_str(&raw)?;
    for event in &events {
        apply(&registry, &mut state, event);
    }
    match out.or(state_path) {
        Some(path) => write_state(&path, &state)?,
        None => println!("{}", state.to_json_pretty()?),
    }
    Ok(())
}

fn run_show(
    state_path: PathBuf,
    format: RenderMode,
    registry_path: Option<PathBuf>,
) -> CliResult<()> {
    let registry = load_registry(registry_path)?;
    let state = load_state(Some(&state_path))?;
    let snapshot = build_snapshot(&registry, &state);
    match format {
        RenderMode::Text => println!("{}", render_text(&snapshot)),
        RenderMode::Json => println!("{}", serde_json::to_string_pretty(&render_json(&snapshot))?),
    }
    Ok(())
}

fn run_clear(state_path: PathBuf, out: Option<PathBuf>) -> CliResult<()> {
    let mut state = load_state(Some(&state_path))?;
    clear_member_selections(&mut state);
    write_state(&out.unwrap_or(state_path), &state)
}

fn run_schema(kind: SchemaKind) -> CliResult<()> {
    let schema = match kind {
        SchemaKind::State => state_schema(),
        SchemaKind::Registry => registry_schema(),
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn prompt_line(presenter: &WizardPresenter, prompt: &PromptContext) -> CliResult<String> {
    presenter.show_prompt(prompt);
    print!("> ");
    io::stdout().flush()?;
    let mut line = String::new();
    let bytes = io::stdin().read_line(&mut line)?;
    if bytes == 0 {
        return Err("input ended before the declaration was finished".into());
    }
    Ok(line.trim().to_string())
}

fn prompt_yes_no(presenter: &WizardPresenter, title: impl Into<String>) -> CliResult<bool> {
    let prompt = PromptContext::yes_no(title);
    loop {
        let line = prompt_line(presenter, &prompt)?;
        match parse_yes_no(&line) {
            Ok(value) => return Ok(value),
            Err(error) => presenter.show_parse_error(&error),
        }
    }
}

fn prompt_option(presenter: &WizardPresenter, field: &FieldSpec) -> CliResult<String> {
    let prompt = PromptContext::choice(field.title.clone(), &field.options);
    loop {
        let line = prompt_line(presenter, &prompt)?;
        match parse_choice(&line, &field.options) {
            Ok(option) => return Ok(option),
            Err(error) => presenter.show_parse_error(&error),
        }
    }
}

fn prompt_text(presenter: &WizardPresenter, title: impl Into<String>) -> CliResult<String> {
    prompt_line(presenter, &PromptContext::free_text(title))
}

fn load_registry(path: Option<PathBuf>) -> CliResult<Registry> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => Ok(Registry::standard()),
    }
}

fn load_state(path: Option<&PathBuf>) -> CliResult<FormState> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(resolve_state_path(path.clone()))?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => Ok(FormState::new()),
    }
}

fn write_state(path: &PathBuf, state: &FormState) -> CliResult<()> {
    let resolved = resolve_state_path(path.clone());
    if let Some(parent) = resolved.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(&resolved, state.to_json_pretty()?)?;
    println!("State written to {}", resolved.display());
    Ok(())
}

/// Relative state paths land in DECLARATION_STATE_DIR when it is set.
fn resolve_state_path(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    match env::var_os("DECLARATION_STATE_DIR") {
        Some(dir) => PathBuf::from(dir).join(path),
        None => path,
    }
}
