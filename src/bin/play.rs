
use std::convert::TryInto;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use structopt::StructOpt;

use bananagraml::{Bank, GameError, Grid, PixelPoint, Position, Rules, Session, Source, TileId, Validator};
use bananagraml::dictionary::load_dictionary;
use bananagraml::session::{Exchange, PlaceOutcome};

#[derive(Debug, serde::Deserialize)]
struct Settings {
    /// Either a `.txt` file with one word per line, or a `.fst` file generated with `make_fst`
    dictionary: PathBuf,

    #[serde(default = "board_width")]
    board_width: u32,
    #[serde(default = "board_height")]
    board_height: u32,
    /// Side of a cell, in pixels
    #[serde(default = "cell_size")]
    cell_size: u32,

    /// Tiles drawn at the start of the game
    #[serde(default = "bench_size")]
    bench_size: usize,

    /// Makes the draws reproducible
    seed: Option<u64>,

    #[serde(default = "yes")]
    require_connected: bool,

    /// Rewritten with the placed tiles after every drop
    dump_file: Option<PathBuf>,
}

fn board_width() -> u32 { 1200 }
fn board_height() -> u32 { 650 }
fn cell_size() -> u32 { 30 }
fn bench_size() -> usize { 21 }
fn yes() -> bool { true }

#[derive(Debug, StructOpt)]
#[structopt(name = "play", about = "Play a solitaire game from the terminal, one command per line")]
struct Opt {
    /// The config file, if not present only the environment and the arguments are used
    #[structopt(short = "c", long = "config")]
    config: Option<String>,

    /// The dictionary of words that are allowed on the board.
    #[structopt(short = "d", long = "dictionary")]
    dict: Option<String>,

    /// Seed of the tile bank
    #[structopt(short = "s", long = "seed")]
    seed: Option<u64>,

    /// Where to write the placed tiles after every drop
    #[structopt(long = "dump-file")]
    dump_file: Option<String>,
}

fn load_config(opt: Opt) -> Result<Settings, config::ConfigError> {
    let mut s = config::Config::new();

    if let Some(f) = opt.config {
        s.merge(config::File::with_name(&f))?;
    }

    s.merge(config::Environment::with_prefix("BANANAGRAML"))?;

    if let Some(d) = opt.dict {
        s.set("dictionary", d)?;
    }
    if let Some(seed) = opt.seed {
        let seed: i64 = seed.try_into()
            .map_err(|_| config::ConfigError::Message(format!("seed {} is too large", seed)))?;
        s.set("seed", seed)?;
    }
    if let Some(f) = opt.dump_file {
        s.set("dump_file", f)?;
    }

    s.try_into()
}

const HELP: &str = "\
commands:
  bench                      list the tiles on the bench
  board                      show the board and its words
  peel                       draw a tile from the bank
  place ID ROW COL           put a tile on a cell
  drop ID X Y                put a tile on the cell centered on a pixel
  group ID ROW COL [...]     move several tiles at once
  dump ID board|bench        trade a tile for three from the bank
  quit";

enum Command {
    Bench,
    Board,
    Peel,
    Place(Vec<(TileId, Position)>),
    Drop(TileId, PixelPoint),
    Dump(TileId, Source),
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let number = |s: &str| s.parse::<u32>().map_err(|e| format!("{:?}: {}", s, e));
    let tile = |s: &str| number(s.trim_start_matches('#')).map(TileId);
    let coord = |s: &str| number(s).map(|n| n as usize);
    let pixel = |s: &str| s.parse::<i64>().map_err(|e| format!("{:?}: {}", s, e));

    match words.as_slice() {
        ["bench"] => Ok(Command::Bench),
        ["board"] => Ok(Command::Board),
        ["peel"] => Ok(Command::Peel),
        ["place", id, row, col] => Ok(Command::Place(vec![
            (tile(*id)?, Position::new(coord(*row)?, coord(*col)?)),
        ])),
        ["group", rest @ ..] if !rest.is_empty() && rest.len() % 3 == 0 => {
            let moves = rest.chunks(3)
                .map(|c| -> Result<(TileId, Position), String> {
                    Ok((tile(c[0])?, Position::new(coord(c[1])?, coord(c[2])?)))
                })
                .collect::<Result<Vec<_>, String>>()?;
            Ok(Command::Place(moves))
        },
        ["drop", id, x, y] => Ok(Command::Drop(tile(*id)?, PixelPoint::new(pixel(*x)?, pixel(*y)?))),
        ["dump", id, source] => Ok(Command::Dump(tile(*id)?, source.parse()?)),
        ["help"] | [] => Ok(Command::Help),
        ["quit"] | ["exit"] => Ok(Command::Quit),
        _ => Err(format!("unknown command {:?}, try help", line.trim())),
    }
}

fn print_bench(session: &Session<Vec<u8>>) {
    let tiles: Vec<String> = session.bench().iter().map(|t| t.to_string()).collect();
    println!("bench: {}", tiles.join(" "));
}

fn print_status(session: &Session<Vec<u8>>) {
    println!(
        "board {}, {} on the bench, {} in the bank",
        if session.is_valid() { "valid" } else { "invalid" },
        session.bench().len(),
        session.bank_len(),
    );
}

fn print_board(session: &Session<Vec<u8>>) {
    print!("{}", session.board());
    let report = session.report();
    for run in report.invalid_words() {
        println!("  {} is not a word", run.word());
    }
    if report.groups > 1 {
        println!("  {} separate groups of tiles", report.groups);
    }
}

fn outcome_lines(outcome: &PlaceOutcome) -> Vec<String> {
    let mut lines: Vec<String> = outcome.displaced.iter()
        .map(|tile| format!("{} went back to the bench", tile))
        .collect();
    if let Some(tile) = outcome.peeled {
        lines.push(format!("bench empty, drew {}", tile));
    }
    lines
}

fn print_outcome(outcome: PlaceOutcome) {
    for line in outcome_lines(&outcome) {
        println!("{}", line);
    }
}

fn write_dump(session: &Session<Vec<u8>>, path: &Option<PathBuf>) -> Result<(), GameError> {
    if let Some(path) = path {
        let file = io::BufWriter::new(std::fs::File::create(path)?);
        session.write_dump(file)?;
    }
    Ok(())
}

fn run(session: &mut Session<Vec<u8>>, command: Command, dump_file: &Option<PathBuf>) -> Result<(), GameError> {
    match command {
        Command::Bench => print_bench(session),
        Command::Board => print_board(session),
        Command::Peel => {
            let tile = session.peel()?;
            println!("drew {}", tile);
        },
        Command::Place(moves) => {
            print_outcome(session.place_group(&moves)?);
            write_dump(session, dump_file)?;
        },
        Command::Drop(id, point) => {
            print_outcome(session.place_at_pixel(id, point)?);
            write_dump(session, dump_file)?;
        },
        Command::Dump(id, source) => match session.remove(id, source)? {
            Exchange::Dumped { returned, drawn } => {
                let drawn: Vec<String> = drawn.iter().map(|t| t.to_string()).collect();
                println!("traded {} for {}", returned, drawn.join(" "));
            },
            Exchange::Kept(tile) => println!("not enough tiles in the bank, {} stays on the bench", tile),
        },
        Command::Help => println!("{}", HELP),
        Command::Quit => unreachable!("handled by the loop"),
    }
    Ok(())
}

fn main() {
    simple_logger::SimpleLogger::from_env().init().unwrap();

    let opt = Opt::from_args();
    let conf = load_config(opt).expect("config");

    let dictionary = load_dictionary(&conf.dictionary).expect("load dictionary");
    let validator = Validator::new(Rules {
        dictionary,
        require_connected: conf.require_connected,
    });
    let grid = Grid::build(conf.board_width, conf.board_height, conf.cell_size);
    log::info!("board of {} rows and {} columns", grid.rows(), grid.cols());

    let mut session = Session::new(grid, validator, Bank::standard(conf.seed));
    session.initialize(conf.bench_size).expect("drawing the starting tiles");

    print_bench(&session);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().expect("flush stdout");

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).expect("read command") == 0 {
            break
        }

        let command = match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue
            },
        };

        match run(&mut session, command, &conf.dump_file) {
            Ok(()) => print_status(&session),
            Err(e) => println!("{}", e),
        }

        if session.is_complete() {
            print_board(&session);
            println!("bananas!");
            break
        }
    }
}


#[test]
fn seed_out_of_range() {
    let opt = Opt {
        config: None,
        dict: Some("words.txt".to_owned()),
        seed: Some(u64::MAX),
        dump_file: None,
    };
    assert!(matches!(load_config(opt), Err(config::ConfigError::Message(_))));

    let opt = Opt {
        config: None,
        dict: Some("words.txt".to_owned()),
        seed: Some(42),
        dump_file: None,
    };
    assert_eq!(load_config(opt).unwrap().seed, Some(42));
}

#[test]
fn displaced_tiles_are_reported() {
    use bananagraml::{Letter, Tile};

    let outcome = PlaceOutcome {
        valid: true,
        displaced: vec![Tile::new(TileId(3), Letter(b'O'))],
        peeled: Some(Tile::new(TileId(7), Letter(b'E'))),
    };
    assert_eq!(outcome_lines(&outcome), vec![
        "O#3 went back to the bench".to_owned(),
        "bench empty, drew E#7".to_owned(),
    ]);
}
