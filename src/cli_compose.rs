use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

use mood_composer::cli_style::{
    self, get_styles, print_command_echo, print_error, print_goodbye, print_help,
    print_key_value, print_key_value_highlight, print_list_item, print_score_bar,
    print_section_footer, print_section_header, print_warning, CommandGroup, CommandHelp,
    TableBuilder,
};
use mood_composer::config::{self, AppConfig};
use mood_composer::create_pipeline;
use mood_composer::mood::{
    AnalysisExplanation, MoodAnalysisPipeline, MoodCategory, MAX_ENERGY,
};
use mood_composer::music::{base_tempo, instruments_for, map_parameters};

use rustyline::{
    completion::Completer, highlight::Highlighter, history::FileHistory, validate::Validator,
    CompletionType, Config, Editor, Helper,
};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(styles=get_styles())]
struct CliArgs {
    /// Path to TOML configuration file.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Answer with calm/neutral defaults when a model backend is unavailable.
    #[clap(long)]
    pub degrade_on_model_failure: bool,
}

#[derive(Parser)]
#[command(styles=get_styles(),name = "")]
struct InnerCli {
    #[command(subcommand)]
    command: InnerCommand,
}

#[derive(Subcommand)]
enum InnerCommand {
    /// Analyzes a text into mood, sentiment and energy, then maps it to
    /// musical parameters.
    Analyze {
        #[clap(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Maps a mood, a sentiment and an energy level to musical parameters.
    /// Unknown moods and sentiments fall back to defaults.
    Map {
        mood: String,
        sentiment: String,
        #[clap(value_parser = clap::value_parser!(u8).range(1..=10))]
        energy: u8,
    },

    /// Shows every intermediate score of an analysis: the sentiment
    /// confidence, the full mood ranking and the energy breakdown.
    Explain {
        #[clap(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Lists the mood categories with their base tempo and instruments.
    Moods,

    /// Close this program.
    Exit,
}

const COMMANDS: &[CommandHelp] = &[
    CommandHelp {
        name: "analyze",
        args: "<text...>",
        description: "Analyze text and map it to musical parameters",
        group: CommandGroup::Analysis,
    },
    CommandHelp {
        name: "explain",
        args: "<text...>",
        description: "Show the mood ranking and energy breakdown",
        group: CommandGroup::Analysis,
    },
    CommandHelp {
        name: "map",
        args: "<mood> <sentiment> <energy>",
        description: "Map labels straight to parameters",
        group: CommandGroup::Reference,
    },
    CommandHelp {
        name: "moods",
        args: "",
        description: "List mood categories",
        group: CommandGroup::Reference,
    },
    CommandHelp {
        name: "help",
        args: "",
        description: "Show this help",
        group: CommandGroup::Session,
    },
    CommandHelp {
        name: "exit",
        args: "",
        description: "Close this program",
        group: CommandGroup::Session,
    },
];

enum CommandExecutionResult {
    Ok,
    Exit,
    Error(String),
}

struct Session {
    pipeline: Arc<MoodAnalysisPipeline>,
    config: AppConfig,
    runtime: Runtime,
}

fn execute_command(line: String, session: &Session) -> CommandExecutionResult {
    let line = line.trim();
    if line.is_empty() {
        return CommandExecutionResult::Ok;
    }
    if line == "help" {
        print_help(COMMANDS);
        return CommandExecutionResult::Ok;
    }

    let args =
        shlex::split(line).unwrap_or_else(|| line.split_whitespace().map(String::from).collect());

    let cli = InnerCli::try_parse_from(std::iter::once(" ").chain(args.iter().map(String::as_str)));

    match cli {
        Ok(cli) => {
            print_command_echo(line);
            match cli.command {
                InnerCommand::Analyze { text } => {
                    let text = text.join(" ");
                    let analysis = match session.runtime.block_on(
                        Arc::clone(&session.pipeline)
                            .analyze_with_timeout(text, session.config.analysis.timeout),
                    ) {
                        Ok(analysis) => analysis,
                        Err(err) => return CommandExecutionResult::Error(err.to_string()),
                    };
                    let parameters =
                        map_parameters(analysis.mood, analysis.sentiment, analysis.energy_level);

                    print_section_header("Analysis");
                    print_key_value_highlight("Mood", analysis.mood.as_str());
                    print_key_value(
                        "Sentiment",
                        &format!(
                            "{} ({:.2})",
                            analysis.sentiment, analysis.sentiment_confidence
                        ),
                    );
                    print_score_bar(
                        "energy",
                        f32::from(analysis.energy_level) / f32::from(MAX_ENERGY),
                        &format!("{}/{}", analysis.energy_level, MAX_ENERGY),
                    );
                    print_key_value_highlight("Tempo", &format!("{} BPM", parameters.tempo));
                    print_key_value("Key", &parameters.key.to_string());
                    print_key_value("Instruments", &parameters.instruments.join(", "));
                    print_section_footer();
                }
                InnerCommand::Map {
                    mood,
                    sentiment,
                    energy,
                } => {
                    let parameters = map_parameters(mood, sentiment, energy);
                    if parameters.mood.category().is_none() {
                        print_warning(&format!(
                            "Unknown mood '{}', using default tempo and instruments",
                            parameters.mood
                        ));
                    }

                    print_section_header("Musical Parameters");
                    print_key_value_highlight("Tempo", &format!("{} BPM", parameters.tempo));
                    print_key_value("Key", &parameters.key.to_string());
                    print_key_value("Mood", &parameters.mood.to_string());
                    print_key_value("Energy", &parameters.energy.to_string());
                    print_key_value("Instruments", &parameters.instruments.join(", "));
                    print_section_footer();
                }
                InnerCommand::Explain { text } => {
                    let text = text.join(" ");
                    match session.runtime.block_on(
                        Arc::clone(&session.pipeline)
                            .explain_with_timeout(text, session.config.analysis.timeout),
                    ) {
                        Ok(explanation) => print_explanation(&explanation),
                        Err(err) => return CommandExecutionResult::Error(err.to_string()),
                    }
                }
                InnerCommand::Moods => {
                    let mut table = TableBuilder::new(vec!["Mood", "Base tempo", "Instruments"]);
                    for mood in MoodCategory::ALL {
                        let tag = mood.into();
                        table.add_row(vec![
                            mood.to_string(),
                            format!("{} BPM", base_tempo(&tag)),
                            instruments_for(&tag).join(", "),
                        ]);
                    }
                    table.print();
                }
                InnerCommand::Exit => return CommandExecutionResult::Exit,
            }
        }

        Err(e) => {
            if e.print().is_err() {
                println!("{}", e);
            }
        }
    }
    CommandExecutionResult::Ok
}

fn print_explanation(explanation: &AnalysisExplanation) {
    let result = &explanation.result;

    print_section_header("Sentiment");
    print_key_value_highlight("Label", explanation.sentiment.label.as_str());
    print_score_bar(
        "confidence",
        explanation.sentiment.confidence,
        &format!("{:.3}", explanation.sentiment.confidence),
    );
    print_section_footer();

    print_section_header("Mood Ranking");
    for m in &explanation.mood_ranking {
        print_score_bar(
            m.category.as_str(),
            m.similarity,
            &format!("{:.3}", m.similarity),
        );
    }
    print_section_footer();

    let energy = &explanation.energy;
    print_section_header("Energy");
    print_key_value("Base", &energy.base.to_string());
    print_key_value("Sentiment", &format!("{:+}", energy.sentiment_adjustment));
    if energy.high_energy_matches.is_empty() && energy.low_energy_matches.is_empty() {
        print_key_value("Keywords", "none");
    }
    for keyword in &energy.high_energy_matches {
        print_list_item(&format!("+1 {}", keyword), 1);
    }
    for keyword in &energy.low_energy_matches {
        print_list_item(&format!("-1 {}", keyword), 1);
    }
    print_key_value("Raw score", &energy.raw_score.to_string());
    print_key_value_highlight("Energy", &format!("{}/{}", result.energy_level, MAX_ENERGY));
    print_section_footer();
}

#[derive(rustyline_derive::Hinter)]
struct MyHelper {
    commands_names: Vec<String>,
}

impl MyHelper {
    pub fn new() -> Self {
        let mut commands_names: Vec<String> = InnerCli::command()
            .get_subcommands()
            .map(|sc| sc.get_name().to_string())
            .collect();
        if !commands_names.iter().any(|c| c == "help") {
            commands_names.push("help".to_string());
        }

        MyHelper { commands_names }
    }
}

impl Completer for MyHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        if line.contains(' ') {
            return Ok((0, Vec::with_capacity(0)));
        }
        let matches = self
            .commands_names
            .iter()
            .filter(|c| c.starts_with(line))
            .cloned()
            .collect::<Vec<_>>();

        Ok((0, matches))
    }
}

impl Highlighter for MyHelper {}
impl Validator for MyHelper {}
impl Helper for MyHelper {}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    let file_config = match &cli_args.config {
        Some(path) => Some(config::FileConfig::load(path)?),
        None => None,
    };
    let cli_config = config::CliConfig {
        degrade_on_model_failure: cli_args.degrade_on_model_failure,
        ..Default::default()
    };
    let app_config = AppConfig::resolve(&cli_config, file_config)?;

    let pipeline = Arc::new(
        create_pipeline(&app_config).context("Could not initialize the analysis pipeline")?,
    );
    if !pipeline.classifier().is_ready() {
        print_warning("Embedding backend unavailable, every text will classify as calm");
    }
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    cli_style::print_welcome(&[
        ("Embedding", format!("{:?}", app_config.embedding.backend)),
        ("Sentiment", format!("{:?}", app_config.sentiment.backend)),
        ("On failure", format!("{:?}", app_config.analysis.degradation)),
        (
            "Version",
            format!("{}-{}", env!("APP_VERSION"), env!("GIT_HASH")),
        ),
    ]);

    let session = Session {
        pipeline,
        config: app_config,
        runtime,
    };

    let config = Config::builder()
        .completion_type(CompletionType::List)
        .build();

    let mut rl = Editor::<MyHelper, FileHistory>::with_config(config)?;
    rl.set_helper(Some(MyHelper::new()));

    let prompt = cli_style::get_prompt();
    loop {
        let readline = rl.readline(&prompt);

        match readline {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                match execute_command(line, &session) {
                    CommandExecutionResult::Ok => {}
                    CommandExecutionResult::Exit => {
                        break;
                    }
                    CommandExecutionResult::Error(err) => {
                        print_error(&err);
                        continue;
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                break;
            }
            Err(e) => {
                print_error(&format!("{:?}", e));
                break;
            }
        }
        cli_style::flush();
    }

    session.runtime.shutdown_background();
    print_goodbye();
    Ok(())
}
