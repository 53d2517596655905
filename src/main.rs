mod app;
mod calendar;
mod detail;
mod exercises;
mod form;
mod help;
mod repository;
mod routine;
mod schedule;
mod theme;
mod workout;
use crate::app::App;
use crate::calendar::util::{parse_year_month, parse_ymd};
use crate::calendar::{plain_grid, CalendarGrid, YearMonth};
use crate::exercises::{Category, ExerciseFilter, CATALOG};
use crate::repository::{
    JsonFileRepository, JsonRoutineRepository, RoutineRepository, WorkoutRepository,
};
use crate::routine::{RoutineDraft, RoutineExercise};
use crate::workout::ScheduledWorkout;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use time::{Date, OffsetDateTime};
use tracing_subscriber::EnvFilter;

static DEFAULT_FILE: &str = "workouts.json";

static DEFAULT_ROUTINES_FILE: &str = "routines.json";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        file: Option<PathBuf>,
        today: Option<Date>,
        month: Option<Date>,
        print: bool,
        log: Option<PathBuf>,
    },
    Exercises {
        query: String,
        category: Option<Category>,
        log: Option<PathBuf>,
    },
    Routines {
        file: Option<PathBuf>,
        log: Option<PathBuf>,
    },
    NewRoutine {
        draft: RoutineDraft,
        file: Option<PathBuf>,
        log: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut file = None;
        let mut today = None;
        let mut print = false;
        let mut exercises = false;
        let mut query = None;
        let mut category = None;
        let mut log = None;
        let mut routines = false;
        let mut routines_file = None;
        let mut draft = None;
        let mut positional = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('f') | Arg::Long("file") => file = Some(parser.value()?.into()),
                Arg::Long("today") => {
                    let value = parser.value()?.string()?;
                    today = Some(parse_date_arg(value, parse_ymd)?);
                }
                Arg::Short('p') | Arg::Long("print") => print = true,
                Arg::Short('e') | Arg::Long("exercises") => {
                    exercises = true;
                    if let Some(value) = parser.optional_value() {
                        query = Some(value.string()?);
                    }
                }
                Arg::Short('c') | Arg::Long("category") => {
                    let value = parser.value()?.string()?;
                    match Category::parse_filter(&value) {
                        Ok(c) => category = c,
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                Arg::Long("log") => log = Some(parser.value()?.into()),
                Arg::Short('r') | Arg::Long("routines") => routines = true,
                Arg::Long("routines-file") => routines_file = Some(parser.value()?.into()),
                Arg::Short('n') | Arg::Long("new-routine") => {
                    draft = Some(RoutineDraft::new(&parser.value()?.string()?));
                }
                Arg::Short('a') | Arg::Long("add") => {
                    let Some(d) = draft.as_mut() else {
                        return Err("--add must follow --new-routine".into());
                    };
                    let value = parser.value()?.string()?;
                    if let Err(e) = d.add_exercise(&value) {
                        return Err(lexopt::Error::ParsingFailed {
                            value,
                            error: Box::new(e),
                        });
                    }
                }
                Arg::Long("sets") => {
                    let sets: u32 = parser.value()?.parse()?;
                    last_exercise(&mut draft, "--sets")?.set_sets(sets);
                }
                Arg::Long("reps") => {
                    let reps: u32 = parser.value()?.parse()?;
                    last_exercise(&mut draft, "--reps")?.set_reps(reps);
                }
                Arg::Long("range") => last_exercise(&mut draft, "--range")?.toggle_rep_range(),
                Arg::Long("max") => {
                    let reps: u32 = parser.value()?.parse()?;
                    last_exercise(&mut draft, "--max")?
                        .set_rep_max(reps)
                        .map_err(|e| lexopt::Error::Custom(Box::new(e)))?;
                }
                Arg::Long("bw") => last_exercise(&mut draft, "--bw")?.toggle_body_weight(),
                Arg::Long("weight") => {
                    let weight = parser.value()?.string()?;
                    last_exercise(&mut draft, "--weight")?.set_weight(&weight);
                }
                Arg::Value(value) if positional.is_none() => positional = Some(value.string()?),
                _ => return Err(arg.unexpected()),
            }
        }
        if let Some(draft) = draft {
            Ok(Command::NewRoutine {
                draft,
                file: routines_file,
                log,
            })
        } else if routines {
            Ok(Command::Routines {
                file: routines_file,
                log,
            })
        } else if exercises {
            Ok(Command::Exercises {
                query: query.or(positional).unwrap_or_default(),
                category,
                log,
            })
        } else {
            let month = positional
                .map(|value| parse_date_arg(value, parse_year_month))
                .transpose()?;
            Ok(Command::Run {
                file,
                today,
                month,
                print,
                log,
            })
        }
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                file,
                today,
                month,
                print,
                log,
            } => {
                let today = match today {
                    Some(d) => d,
                    None => {
                        OffsetDateTime::now_local()
                            .context("failed to determine local date")?
                            .date()
                    }
                };
                init_logging(log.as_deref(), print)?;
                let month = YearMonth::of(month.unwrap_or(today))
                    .context("month is outside the supported range")?;
                let file = file
                    .or_else(|| std::env::var_os("FITCAL_FILE").map(PathBuf::from))
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE));
                let repository = JsonFileRepository::new(file);
                let workouts = repository.fetch()?;
                tracing::info!(
                    path = %repository.path().display(),
                    %today,
                    %month,
                    "starting"
                );
                if print {
                    print!("{}", render_month(month, &workouts, today));
                    Ok(())
                } else {
                    with_terminal(|mut terminal| {
                        terminal.hide_cursor().context("failed to hide cursor")?;
                        App::new(&repository, workouts, today, month).run(&mut terminal)?;
                        Ok(())
                    })
                }
            }
            Command::Exercises {
                query,
                category,
                log,
            } => {
                init_logging(log.as_deref(), true)?;
                let filter = ExerciseFilter::new(&query, category);
                let matches = filter.apply(CATALOG);
                tracing::debug!(query = %query, count = matches.len(), "filtered exercise catalog");
                if matches.is_empty() {
                    println!("No exercises found");
                }
                for ex in matches {
                    println!("{:<24} {:<10} {}", ex.name, ex.category.name(), ex.muscles);
                }
                Ok(())
            }
            Command::Routines { file, log } => {
                init_logging(log.as_deref(), true)?;
                let routines = routine_repository(file).fetch_routines()?;
                if routines.is_empty() {
                    println!("No saved workouts");
                }
                for (i, r) in routines.iter().enumerate() {
                    if i > 0 {
                        println!();
                    }
                    print!("{r}");
                }
                Ok(())
            }
            Command::NewRoutine { draft, file, log } => {
                init_logging(log.as_deref(), true)?;
                let repository = routine_repository(file);
                let mut routines = repository.fetch_routines()?;
                let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
                let routine = draft.save(&routines, now)?;
                print!("{routine}");
                routines.push(routine);
                repository.replace_routines(&routines)?;
                println!();
                println!("Workout saved successfully!");
                Ok(())
            }
            Command::Help => {
                println!("Usage: fitcal [options] [YYYY-MM]");
                println!();
                println!("Terminal workout calendar: schedule workouts and track their completion");
                println!();
                println!("Options:");
                println!("  -f, --file PATH       Read & write workouts in the given JSON file");
                println!("                        [default: $FITCAL_FILE or {DEFAULT_FILE}]");
                println!("      --today YYYY-MM-DD");
                println!("                        Treat the given date as today");
                println!("  -p, --print           Print the month and its workouts and exit");
                println!("  -e, --exercises [QUERY]");
                println!("                        List catalog exercises matching QUERY and exit");
                println!("  -c, --category CATEGORY");
                println!("                        Only list exercises in the given category");
                println!("  -r, --routines        List saved workouts and their exercises and exit");
                println!("  -n, --new-routine NAME");
                println!("                        Save a new workout made of the exercises given");
                println!("                        with the following options:");
                println!("  -a, --add EXERCISE    Add a catalog or custom exercise");
                println!("      --sets N          Sets for the last added exercise [default: 3]");
                println!("      --reps N          Reps (or the low end of the rep range)");
                println!("      --range           Toggle a rep range, keeping the reps as its low end");
                println!("      --max N           High end of the rep range");
                println!("      --weight WEIGHT   Weight, such as \"135 lb\"");
                println!("      --bw              Toggle bodyweight, clearing the weight");
                println!("      --routines-file PATH");
                println!("                        Read & write saved workouts in the given JSON file");
                println!("                        [default: $FITCAL_ROUTINES or {DEFAULT_ROUTINES_FILE}]");
                println!("      --log PATH        Write log messages to the given file");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

/// The exercise that per-exercise options such as `--sets` apply to
fn last_exercise<'a>(
    draft: &'a mut Option<RoutineDraft>,
    option: &str,
) -> Result<&'a mut RoutineExercise, lexopt::Error> {
    draft
        .as_mut()
        .and_then(RoutineDraft::last_exercise)
        .ok_or_else(|| format!("{option} must follow --add").into())
}

fn routine_repository(file: Option<PathBuf>) -> JsonRoutineRepository {
    let file = file
        .or_else(|| std::env::var_os("FITCAL_ROUTINES").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ROUTINES_FILE));
    JsonRoutineRepository::new(file)
}

fn parse_date_arg(
    value: String,
    parse: fn(&str) -> Result<Date, time::error::Parse>,
) -> Result<Date, lexopt::Error> {
    match parse(&value) {
        Ok(d) => Ok(d),
        Err(e) => Err(lexopt::Error::ParsingFailed {
            value,
            error: Box::new(e),
        }),
    }
}

/// Log to `path` if given, else to stderr if `stderr` is true.  The terminal
/// UI draws over stderr, so it only ever logs to a file.
fn init_logging(path: Option<&Path>, stderr: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Some(path) = path {
        let fp = File::create(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(fp))
            .with_ansi(false)
            .init();
    } else if stderr {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

/// The month grid as plain text followed by one line per workout shown in it
fn render_month(month: YearMonth, workouts: &[ScheduledWorkout], today: Date) -> String {
    let grid = CalendarGrid::build(month, workouts, today);
    let mut lines = grid
        .workouts()
        .map(|w| {
            format!(
                "{}  {:<24} {:>3} min  {}",
                w.date,
                w.workout_name,
                w.duration,
                w.status(today)
            )
        })
        .collect::<Vec<_>>();
    let (done, total) = grid
        .current_month_days()
        .flat_map(|day| &day.workouts)
        .fold((0, 0), |(done, total), w| {
            (done + usize::from(w.completed), total + 1)
        });
    if lines.is_empty() {
        lines.push(String::from("No workouts scheduled"));
    }
    if total > 0 {
        lines.push(String::new());
        lines.push(format!("{done} of {total} workouts completed in {month}"));
    }
    let mut out = plain_grid(&grid);
    out.push('\n');
    for ln in lines {
        out.push_str(&ln);
        out.push('\n');
    }
    out
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_args(args.iter().copied()))
    }

    #[test]
    fn test_parse_defaults() {
        assert_eq!(
            parse(&[]).unwrap(),
            Command::Run {
                file: None,
                today: None,
                month: None,
                print: false,
                log: None,
            }
        );
    }

    #[test]
    fn test_parse_run_options() {
        assert_eq!(
            parse(&["-p", "--file", "w.json", "--today", "2025-01-16", "2025-03"]).unwrap(),
            Command::Run {
                file: Some(PathBuf::from("w.json")),
                today: Some(date!(2025 - 01 - 16)),
                month: Some(date!(2025 - 03 - 01)),
                print: true,
                log: None,
            }
        );
    }

    #[test]
    fn test_parse_bad_month() {
        assert!(matches!(
            parse(&["2025-13"]),
            Err(lexopt::Error::ParsingFailed { .. })
        ));
        assert!(parse(&["2025-01", "2025-02"]).is_err());
    }

    #[test]
    fn test_parse_exercises() {
        assert_eq!(
            parse(&["-e", "-c", "legs", "squat"]).unwrap(),
            Command::Exercises {
                query: String::from("squat"),
                category: Some(Category::Legs),
                log: None,
            }
        );
        assert_eq!(
            parse(&["--exercises=press", "--category", "all"]).unwrap(),
            Command::Exercises {
                query: String::from("press"),
                category: None,
                log: None,
            }
        );
        assert!(matches!(
            parse(&["-e", "-c", "yoga"]),
            Err(lexopt::Error::ParsingFailed { .. })
        ));
    }

    #[test]
    fn test_parse_routines() {
        assert_eq!(
            parse(&["-r", "--routines-file", "r.json"]).unwrap(),
            Command::Routines {
                file: Some(PathBuf::from("r.json")),
                log: None,
            }
        );
    }

    #[test]
    fn test_parse_new_routine() {
        let cmd = parse(&[
            "-n", "Push Day", "-a", "bench press", "--sets", "4", "--reps", "8", "--range",
            "--max", "12", "--weight", "135 lb", "--add", "Sled Push", "--bw",
        ])
        .unwrap();
        let Command::NewRoutine { draft, file, .. } = cmd else {
            panic!("expected a new routine");
        };
        assert_eq!(file, None);
        let routine = draft
            .save(&[], time::macros::datetime!(2025-01-16 09:00 UTC))
            .unwrap();
        assert_eq!(routine.name, "Push Day");
        let summaries = routine
            .exercises
            .iter()
            .map(|ex| format!("{}: {}", ex.name, ex.summary()))
            .collect::<Vec<_>>();
        assert_eq!(
            summaries,
            ["Bench Press: 4 sets × 8-12 × 135 lb", "Sled Push: 3 sets × — × BW"]
        );
    }

    #[test]
    fn test_parse_new_routine_errors() {
        assert!(matches!(
            parse(&["--add", "Squats"]),
            Err(lexopt::Error::Custom(_))
        ));
        assert!(matches!(
            parse(&["-n", "Legs", "--sets", "4"]),
            Err(lexopt::Error::Custom(_))
        ));
        assert!(matches!(
            parse(&["-n", "Legs", "-a", "  "]),
            Err(lexopt::Error::ParsingFailed { .. })
        ));
        assert!(matches!(
            parse(&["-n", "Legs", "-a", "Squats", "--max", "10"]),
            Err(lexopt::Error::Custom(_))
        ));
        // An empty routine parses but is refused when saved
        let Ok(Command::NewRoutine { draft, .. }) = parse(&["-n", "Legs"]) else {
            panic!("expected a new routine");
        };
        assert_eq!(
            draft
                .save(&[], time::macros::datetime!(2025-01-16 09:00 UTC))
                .unwrap_err()
                .to_string(),
            "Please add at least one exercise"
        );
    }

    #[test]
    fn test_render_month() {
        let month = YearMonth::of(date!(2025 - 01 - 01)).unwrap();
        let workouts = vec![ScheduledWorkout {
            id: String::from("1"),
            date: date!(2025 - 01 - 15),
            workout_name: String::from("Upper Body Strength"),
            exercises: 6,
            duration: 45,
            completed: false,
            completed_at: None,
        }];
        let out = render_month(month, &workouts, date!(2025 - 01 - 16));
        assert!(out.starts_with(&plain_grid(&CalendarGrid::build(
            month,
            &workouts,
            date!(2025 - 01 - 16)
        ))));
        assert!(out.ends_with(
            "2025-01-15  Upper Body Strength       45 min  Missed\n\n\
             0 of 1 workouts completed in January 2025\n"
        ));
        let empty = render_month(month, &[], date!(2025 - 01 - 16));
        assert!(empty.ends_with("\nNo workouts scheduled\n"));
    }
}
