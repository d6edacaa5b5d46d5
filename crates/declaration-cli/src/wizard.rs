use std::fmt::Write;

use declaration_spec::{FormState, Registry, Snapshot};

/// Controls which bits of state the wizard prints.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Verbosity {
    /// Clean output: question prompts only.
    Clean,
    /// Verbose output: statuses, disclosed sections, parse expectations.
    Verbose,
}

impl Verbosity {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Clean
        }
    }

    pub fn is_verbose(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}

/// Prints prompts and progress once the engine discloses a section.
pub struct WizardPresenter {
    verbosity: Verbosity,
    header_printed: bool,
    show_answers_json: bool,
}

impl WizardPresenter {
    pub fn new(verbosity: Verbosity, show_answers_json: bool) -> Self {
        Self {
            verbosity,
            header_printed: false,
            show_answers_json,
        }
    }

    pub fn show_header(&mut self, registry: &Registry) {
        if self.header_printed {
            return;
        }
        println!("{} ({})", registry.title, registry.id);
        self.header_printed = true;
    }

    pub fn show_status(&self, snapshot: &Snapshot) {
        if !self.verbosity.is_verbose() {
            return;
        }
        println!(
            "Status: {} ({}/{})",
            snapshot.status.as_str(),
            snapshot.completion.answered,
            snapshot.completion.total
        );
        let disclosed: Vec<String> = snapshot
            .visibility
            .iter()
            .filter(|(_, visible)| **visible)
            .map(|(section, _)| section.to_string())
            .collect();
        if !disclosed.is_empty() {
            println!("Disclosed sections:");
            for section in disclosed {
                println!(" - {}", section);
            }
        }
    }

    pub fn show_prompt(&self, prompt: &PromptContext) {
        let mut line = prompt.title.clone();
        if let Some(hint) = &prompt.hint {
            line.push(' ');
            line.push_str(hint);
        }
        println!("{}", line);
        for (index, choice) in prompt.choices.iter().enumerate() {
            println!("  {}. {}", index + 1, choice);
        }
    }

    pub fn show_parse_error(&self, error: &AnswerParseError) {
        eprintln!("Invalid answer: {}", error.user_message);
        if self.verbosity.is_verbose()
            && let Some(debug) = &error.debug_message
        {
            eprintln!("  Expected: {}", debug);
        }
    }

    pub fn show_completion(&self, state: &FormState) {
        println!("Done ✅");
        match state.to_cbor() {
            Ok(bytes) => {
                println!("Answers (CBOR hex): {}", encode_hex(&bytes));
            }
            Err(err) => {
                eprintln!("Failed to serialize answers to CBOR: {}", err);
            }
        }
        if self.show_answers_json {
            match state.to_json_pretty() {
                Ok(pretty) => println!("{}", pretty),
                Err(err) => {
                    eprintln!("Failed to serialize answers to JSON: {}", err);
                }
            }
        }
    }
}

/// Context used to format a single prompt.
pub struct PromptContext {
    pub title: String,
    pub hint: Option<String>,
    pub choices: Vec<String>,
}

impl PromptContext {
    pub fn yes_no(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            hint: Some("(כן/לא)".to_string()),
            choices: Vec::new(),
        }
    }

    pub fn choice(title: impl Into<String>, choices: &[String]) -> Self {
        Self {
            title: title.into(),
            hint: Some("(בחרו מספר)".to_string()),
            choices: choices.to_vec(),
        }
    }

    pub fn free_text(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            hint: None,
            choices: Vec::new(),
        }
    }
}

/// Error produced when parsing answers from the user.
#[derive(Debug)]
pub struct AnswerParseError {
    pub user_message: String,
    pub debug_message: Option<String>,
}

impl AnswerParseError {
    pub fn new(user_message: impl Into<String>, debug_message: Option<String>) -> Self {
        Self {
            user_message: user_message.into(),
            debug_message,
        }
    }
}

pub fn parse_yes_no(input: &str) -> Result<bool, AnswerParseError> {
    match input.trim() {
        "כן" | "yes" | "y" | "true" => Ok(true),
        "לא" | "no" | "n" | "false" => Ok(false),
        other => Err(AnswerParseError::new(
            format!("'{}' is not a yes/no answer", other),
            Some("כן/לא, yes/no, y/n".to_string()),
        )),
    }
}

/// Accepts a 1-based option number or the option text itself.
pub fn parse_choice(input: &str, choices: &[String]) -> Result<String, AnswerParseError> {
    let trimmed = input.trim();
    if let Ok(index) = trimmed.parse::<usize>()
        && (1..=choices.len()).contains(&index)
    {
        return Ok(choices[index - 1].clone());
    }
    if let Some(found) = choices.iter().find(|choice| choice.as_str() == trimmed) {
        return Ok(found.clone());
    }
    Err(AnswerParseError::new(
        format!("'{}' is not one of the offered options", trimmed),
        Some(format!("1..{} or one of: {}", choices.len(), choices.join(", "))),
    ))
}

fn encode_hex(bytes: &[u8]) -> String {
    let mut encoded = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        write!(&mut encoded, "{:02x}", byte).expect("writing to string cannot fail");
    }
    encoded
}
