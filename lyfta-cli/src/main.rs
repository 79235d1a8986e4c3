mod rest_timer;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::time::{Duration, Instant};

use lyfta::api::{EnvTokenProvider, HttpApi, RemoteApi};
use lyfta::builder::{Action, MoveDirection, SaveOutcome, WorkoutBuilder, save_workout};
use lyfta::model::Template;
use lyfta::store::JsonFileStore;
use lyfta::templates::TemplateCatalog;

use crossterm::event::{self, KeyCode};
use ratatui::{
    DefaultTerminal,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::Text,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use rest_timer::RestTimer;

#[derive(Parser, Debug)]
#[command(version, about = "Lyfta - Workout Builder CLI", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive workout builder session
    Interactive {
        /// Template id to hydrate the builder from
        #[arg(short, long)]
        template: Option<String>,
    },
    /// List templates: local cache merged with the online listing
    Templates,
    /// Fetch one template by id and print it
    Show {
        #[arg(short, long)]
        id: String,
    },
    /// List recorded workout sessions
    Sessions,
}

fn store_from_env() -> JsonFileStore {
    let path =
        std::env::var("LYFTA_STORE_PATH").unwrap_or_else(|_| "lyfta-templates.json".to_string());
    JsonFileStore::new(path)
}

fn api_from_env() -> Result<HttpApi<EnvTokenProvider>> {
    let base_url =
        std::env::var("LYFTA_API_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
    HttpApi::new(base_url, EnvTokenProvider)
}

const NORMAL_KEYS: &str = "j/k: select | a: add exercise | s: set | x: done | J/K: move | u: dup | D: del | t: template | n: name | w: save | q: quit";

enum InputMode {
    Normal,
    AddingExercise,
    NamingWorkout,
}

struct BuilderSession {
    builder: WorkoutBuilder,
    selected: usize,
    status_message: String,
    input_mode: InputMode,
    input_buffer: String,
    rest_timer: RestTimer,
    started: Instant,
}

impl BuilderSession {
    fn new(builder: WorkoutBuilder) -> Self {
        Self {
            builder,
            selected: 0,
            status_message: NORMAL_KEYS.to_string(),
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            rest_timer: RestTimer::default(),
            started: Instant::now(),
        }
    }

    fn exercise_count(&self) -> usize {
        self.builder.state().exercises.len()
    }

    fn selected_exercise_id(&self) -> Option<u64> {
        self.builder
            .state()
            .exercises
            .get(self.selected)
            .map(|e| e.id)
    }

    fn clamp_selection(&mut self) {
        let count = self.exercise_count();
        if count > 0 && self.selected >= count {
            self.selected = count - 1;
        }
    }

    fn scroll_down(&mut self) {
        if self.exercise_count() > 0 && self.selected < self.exercise_count() - 1 {
            self.selected += 1;
        }
    }

    fn scroll_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    fn tick(&mut self) {
        self.builder
            .dispatch(Action::SetTimer(self.started.elapsed().as_secs()));
    }

    fn add_set(&mut self) {
        if let Some(exercise_id) = self.selected_exercise_id() {
            self.builder.dispatch(Action::AddSet { exercise_id });
            self.status_message = "Added set".to_string();
        }
    }

    fn remove_last_set(&mut self) {
        let Some(exercise) = self.builder.state().exercises.get(self.selected) else {
            return;
        };
        let exercise_id = exercise.id;
        let before = exercise.sets.len();
        if let Some(set_id) = exercise.sets.last().map(|s| s.id) {
            self.builder.dispatch(Action::RemoveSet {
                exercise_id,
                set_id,
            });
        }
        self.status_message = if self.builder.state().exercises[self.selected].sets.len() == before
        {
            "An exercise keeps at least one set".to_string()
        } else {
            "Removed set".to_string()
        };
    }

    /// Complete the first open set of the selected exercise and start the
    /// rest countdown from its rest time.
    fn complete_next_set(&mut self) {
        let Some(exercise) = self.builder.state().exercises.get(self.selected) else {
            return;
        };
        let exercise_id = exercise.id;
        let rest_time = exercise.rest_time;
        let Some(set_id) = exercise.sets.iter().find(|s| !s.is_completed).map(|s| s.id) else {
            self.status_message = "All sets done for this exercise".to_string();
            return;
        };
        self.builder.dispatch(Action::ToggleSetCompletion {
            exercise_id,
            set_id,
        });
        self.rest_timer.start(rest_time);
        self.status_message = format!("Set done, rest {rest_time}s");
    }

    fn remove_selected_exercise(&mut self) {
        if let Some(exercise_id) = self.selected_exercise_id() {
            self.builder.dispatch(Action::RemoveExercise { exercise_id });
            self.clamp_selection();
            self.status_message = "Removed exercise".to_string();
        }
    }

    fn duplicate_selected_exercise(&mut self) {
        if let Some(exercise_id) = self.selected_exercise_id() {
            self.builder
                .dispatch(Action::DuplicateExercise { exercise_id });
            self.status_message = "Duplicated exercise".to_string();
        }
    }

    fn move_selected(&mut self, direction: MoveDirection) {
        let Some(exercise_id) = self.selected_exercise_id() else {
            return;
        };
        self.builder.dispatch(Action::MoveExercise {
            exercise_id,
            direction,
        });
        // Follow the exercise to its new slot; boundary moves were no-ops.
        let new_index = self
            .builder
            .state()
            .exercises
            .iter()
            .position(|e| e.id == exercise_id);
        if let Some(index) = new_index {
            self.selected = index;
        }
    }

    fn toggle_expanded(&mut self) {
        if let Some(exercise_id) = self.selected_exercise_id() {
            self.builder
                .dispatch(Action::ToggleExerciseExpanded { exercise_id });
        }
    }

    fn toggle_save_as_template(&mut self) {
        let save = !self.builder.state().save_as_template;
        self.builder.dispatch(Action::SetSaveAsTemplate(save));
        self.status_message = if save {
            "Will save as a reusable template".to_string()
        } else {
            "Will save as a one-off session".to_string()
        };
    }

    fn commit_input(&mut self) {
        let text = std::mem::take(&mut self.input_buffer);
        match self.input_mode {
            InputMode::AddingExercise => {
                if text.is_empty() {
                    self.status_message = "Exercise name cannot be empty".to_string();
                } else {
                    self.builder
                        .dispatch(Action::AddExerciseFromLibrary { name: text });
                    self.selected = self.exercise_count() - 1;
                    self.status_message = NORMAL_KEYS.to_string();
                }
            }
            InputMode::NamingWorkout => {
                self.builder.dispatch(Action::SetName(text));
                self.status_message = NORMAL_KEYS.to_string();
            }
            InputMode::Normal => {}
        }
        self.input_mode = InputMode::Normal;
    }

    fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
        self.status_message = NORMAL_KEYS.to_string();
    }

    async fn save<A: RemoteApi>(&mut self, store: &JsonFileStore, api: &A) {
        if self.builder.state().name.is_empty() {
            self.status_message = "Name the workout first (n)".to_string();
            return;
        }
        match save_workout(self.builder.state(), store, api).await {
            Ok(SaveOutcome::Synced(template)) => {
                self.status_message = format!("Saved and synced ({})", template.id);
            }
            Ok(SaveOutcome::LocalOnly { warning, .. }) => {
                self.status_message = warning;
            }
            Err(e) => {
                self.status_message = format!("Save failed: {e:#}");
            }
        }
    }

    fn exercise_items(&self) -> Vec<ListItem<'_>> {
        self.builder
            .state()
            .exercises
            .iter()
            .enumerate()
            .map(|(idx, exercise)| {
                let done = exercise.sets.iter().filter(|s| s.is_completed).count();
                let mut lines = vec![format!(
                    "{} ({} sets, {} done, rest {}s)",
                    exercise.name,
                    exercise.sets.len(),
                    done,
                    exercise.rest_time
                )];
                if exercise.is_expanded {
                    for set in &exercise.sets {
                        let mark = if set.is_completed { "x" } else { " " };
                        lines.push(format!(
                            "  [{}] #{} {:.1}kg x {} reps",
                            mark, set.id, set.weight, set.reps
                        ));
                    }
                }

                let style = if idx == self.selected {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(Text::from(lines.join("\n"))).style(style)
            })
            .collect()
    }

    fn header_line(&self) -> String {
        let state = self.builder.state();
        let name = if state.name.is_empty() {
            "(unnamed workout)"
        } else {
            state.name.as_str()
        };
        let elapsed = state.timer;
        let mut line = format!(
            "{} - {:02}:{:02}:{:02}",
            name,
            elapsed / 3600,
            (elapsed % 3600) / 60,
            elapsed % 60
        );
        if state.save_as_template {
            line.push_str(" [template]");
        }
        match self.rest_timer.remaining_secs() {
            Some(0) => line.push_str(" | rest over (o: dismiss)"),
            Some(secs) => line.push_str(&format!(" | rest {secs}s")),
            None => {}
        }
        line
    }
}

async fn run_builder_session<A: RemoteApi>(
    mut terminal: DefaultTerminal,
    builder: WorkoutBuilder,
    store: &JsonFileStore,
    api: &A,
) -> Result<()> {
    let mut session = BuilderSession::new(builder);

    loop {
        session.tick();

        terminal.draw(|frame| {
            let chunks = Layout::vertical([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(3),
            ])
            .split(frame.area());

            let header = Paragraph::new(session.header_line())
                .style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(header, chunks[0]);

            match session.input_mode {
                InputMode::Normal => {
                    if session.exercise_count() == 0 {
                        let empty_msg = Paragraph::new(
                            "No exercises yet.\nPress 'a' to add one from the library!",
                        )
                        .style(Style::default().fg(Color::Gray))
                        .block(Block::default().borders(Borders::ALL).title("Exercises"));
                        frame.render_widget(empty_msg, chunks[1]);
                    } else {
                        let list = List::new(session.exercise_items()).block(
                            Block::default().borders(Borders::ALL).title(format!(
                                "Exercises ({} total)",
                                session.exercise_count()
                            )),
                        );
                        let mut list_state = ListState::default();
                        list_state.select(Some(session.selected));
                        frame.render_stateful_widget(list, chunks[1], &mut list_state);
                    }
                }
                InputMode::AddingExercise | InputMode::NamingWorkout => {
                    let title = match session.input_mode {
                        InputMode::AddingExercise => "New Exercise Name",
                        _ => "Workout Name",
                    };
                    let input_widget = Paragraph::new(session.input_buffer.as_str())
                        .style(Style::default().fg(Color::Yellow))
                        .block(Block::default().borders(Borders::ALL).title(title));
                    frame.render_widget(input_widget, chunks[1]);
                }
            }

            let footer = Paragraph::new(session.status_message.as_str())
                .style(Style::default().fg(Color::White))
                .block(Block::default().borders(Borders::ALL).title("Status"));
            frame.render_widget(footer, chunks[2]);
        })?;

        // Poll so the elapsed clock and rest countdown keep moving while
        // the keyboard is idle.
        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        if let event::Event::Key(key) = event::read()? {
            match session.input_mode {
                InputMode::Normal => match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') => {
                        return Ok(());
                    }
                    KeyCode::Char('j') | KeyCode::Down => session.scroll_down(),
                    KeyCode::Char('k') | KeyCode::Up => session.scroll_up(),
                    KeyCode::Char('a') => {
                        session.input_mode = InputMode::AddingExercise;
                        session.input_buffer.clear();
                        session.status_message = "Enter exercise name:".to_string();
                    }
                    KeyCode::Char('n') => {
                        session.input_mode = InputMode::NamingWorkout;
                        session.input_buffer = session.builder.state().name.clone();
                        session.status_message = "Enter workout name:".to_string();
                    }
                    KeyCode::Char('s') => session.add_set(),
                    KeyCode::Char('r') => session.remove_last_set(),
                    KeyCode::Char('x') => session.complete_next_set(),
                    KeyCode::Char('e') => session.toggle_expanded(),
                    KeyCode::Char('u') => session.duplicate_selected_exercise(),
                    KeyCode::Char('D') => session.remove_selected_exercise(),
                    KeyCode::Char('K') => session.move_selected(MoveDirection::Up),
                    KeyCode::Char('J') => session.move_selected(MoveDirection::Down),
                    KeyCode::Char('t') => session.toggle_save_as_template(),
                    KeyCode::Char('p') => session.rest_timer.toggle_pause(),
                    KeyCode::Char('o') => session.rest_timer.dismiss(),
                    KeyCode::Char('w') => session.save(store, api).await,
                    _ => {}
                },
                InputMode::AddingExercise | InputMode::NamingWorkout => match key.code {
                    KeyCode::Enter => session.commit_input(),
                    KeyCode::Esc => session.cancel_input(),
                    KeyCode::Char(c) => session.input_buffer.push(c),
                    KeyCode::Backspace => {
                        session.input_buffer.pop();
                    }
                    _ => {}
                },
            }
        }
    }
}

fn print_template_row(template: &Template) {
    println!(
        "{}  ({} exercises){}  [{}]",
        template.workout.name,
        template.workout.exercises.len(),
        if template.is_template {
            ""
        } else {
            "  (session)"
        },
        template.id
    );
}

fn print_template_detail(template: &Template) {
    println!("{}", template.workout.name);
    if !template.workout.description.is_empty() {
        println!("  {}", template.workout.description);
    }
    for exercise in &template.workout.exercises {
        println!("  {} (rest {}s)", exercise.name, exercise.rest_time);
        for set in &exercise.sets {
            let mark = if set.is_completed { "x" } else { " " };
            println!("    [{}] {:.1}kg x {} reps", mark, set.weight, set.reps);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();
    let args = Args::parse();

    let store = store_from_env();
    let api = api_from_env()?;

    match args.command {
        Commands::Interactive { template } => {
            let builder = match template {
                Some(id) => {
                    let template = api.fetch_template(&id).await?;
                    WorkoutBuilder::from_template(template)
                }
                None => WorkoutBuilder::new(),
            };

            let terminal = ratatui::init();
            let result = run_builder_session(terminal, builder, &store, &api).await;
            ratatui::restore();
            result
        }
        Commands::Templates => {
            let catalog = TemplateCatalog::new(store, api);
            let cached = catalog.cached();
            if !cached.is_empty() {
                println!("Cached ({}):", cached.len());
                for template in &cached {
                    print_template_row(template);
                }
                println!();
            }

            let merged = catalog.refresh().await;
            if merged.is_empty() {
                println!("No templates found.");
            } else {
                println!("Templates ({}):", merged.len());
                for template in &merged {
                    print_template_row(template);
                }
            }
            Ok(())
        }
        Commands::Show { id } => {
            let template = api.fetch_template(&id).await?;
            print_template_detail(&template);
            Ok(())
        }
        Commands::Sessions => {
            let sessions = api.list_sessions().await?;
            if sessions.is_empty() {
                println!("No recorded sessions.");
            }
            for session in &sessions {
                let duration = session.workout.timer;
                println!(
                    "{}  {:02}:{:02}:{:02}  [{}]",
                    session.workout.name,
                    duration / 3600,
                    (duration % 3600) / 60,
                    duration % 60,
                    session.id
                );
            }
            Ok(())
        }
    }
}
