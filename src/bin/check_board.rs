
use std::convert::TryInto;
use std::path::PathBuf;
use std::time::Instant;

use structopt::StructOpt;

use bananagraml::{Board, Rules, Validator};
use bananagraml::dictionary::load_dictionary;

#[derive(Debug)]
enum FileOrString {
    File(PathBuf),
    String(String),
}

impl FileOrString {
    pub fn read_to_string(self) -> std::io::Result<String> {
        match self {
            Self::String(s) => Ok(s),
            Self::File(f) => std::fs::read_to_string(f),
        }
    }
}

impl<'de> serde::Deserialize<'de> for FileOrString {
    fn deserialize<D>(deserializer: D) -> Result<FileOrString, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{Visitor, MapAccess, SeqAccess, Error};
        use std::fmt;

        #[derive(serde::Deserialize)]
        #[serde(field_identifier, rename_all = "snake_case")]
        enum FileKey {
            File,
        }

        struct FileOrStringVisitor;

        impl<'de> Visitor<'de> for FileOrStringVisitor {
            type Value = FileOrString;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a board as a string, a list of rows, or { file = \"...\" }")
            }

            fn visit_map<V>(self, mut map: V) -> Result<FileOrString, V::Error>
            where
                V: MapAccess<'de>,
            {
                let _: FileKey = map.next_key()?.ok_or(V::Error::missing_field("file"))?;
                let file = map.next_value()?;
                Ok(FileOrString::File(file))
            }

            fn visit_seq<V>(self, mut seq: V) -> Result<FileOrString, V::Error>
            where
                V: SeqAccess<'de>,
            {
                let mut rows: Vec<String> = vec![];
                while let Some(row) = seq.next_element()? {
                    rows.push(row);
                }
                Ok(FileOrString::String(rows.join("\n")))
            }

            fn visit_str<E>(self, v: &str) -> Result<FileOrString, E> {
                Ok(FileOrString::String(v.to_owned()))
            }
            fn visit_string<E>(self, v: String) -> Result<FileOrString, E> {
                Ok(FileOrString::String(v))
            }
        }

        deserializer.deserialize_any(FileOrStringVisitor)
    }
}

#[derive(Debug, serde::Deserialize)]
struct Settings {
    /// The dictionary of words that are allowed on the board.
    ///
    /// Either a `.txt` file with one word per line, or a `.fst` file generated with `make_fst`
    dictionary: PathBuf,

    /// The board as a string, as a list of rows, or the file containing it (more info in `Opt`)
    board: FileOrString,

    #[serde(default = "yes")]
    require_connected: bool,

    /// Cut the listing of the words after this many, not present means all are shown
    n_shown: Option<usize>,
}

fn yes() -> bool { true }

#[derive(Debug, StructOpt)]
#[structopt(name = "check_board", about = "Check that every word of a board is in the dictionary, and that the tiles hold together")]
struct Opt {
    /// The config file, if not present only the environment and the arguments are used
    #[structopt(short = "c", long = "config")]
    config: Option<String>,

    /// The dictionary of words that are allowed on the board.
    ///
    /// Either a `.txt` file with one word per line, or a `.fst` file generated with `make_fst`
    #[structopt(short = "d", long = "dictionary")]
    dict: Option<String>,

    /// The board, where one line in the file corresponds to one row of the board.
    /// Spaces, underscores and dots are interpreted as empty squares
    #[structopt(short = "b", long = "board")]
    board_file: Option<String>,

    /// Only check the words, separate groups of tiles are accepted
    #[structopt(long = "allow-groups")]
    allow_groups: bool,

    /// The number of words shown, not present means all words are shown
    #[structopt(short = "n", long = "number-shown")]
    n_shown: Option<usize>,
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
    if let Some(b) = opt.board_file {
        s.set("board.file", b)?;
    }
    if opt.allow_groups {
        s.set("require_connected", false)?;
    }
    if let Some(n) = opt.n_shown {
        let n: i64 = n.try_into()
            .map_err(|_| config::ConfigError::Message(format!("cannot show {} words", n)))?;
        s.set("n_shown", n)?;
    }

    s.try_into()
}

fn main() {
    simple_logger::SimpleLogger::from_env().init().unwrap();

    let opt = Opt::from_args();

    let conf = load_config(opt).expect("config");

    let board = conf.board.read_to_string().expect("read board");
    let dictionary = load_dictionary(&conf.dictionary).expect("load dictionary");

    let start = Instant::now();
    let board = Board::parse(&board);
    let validator = Validator::new(Rules {
        dictionary,
        require_connected: conf.require_connected,
    });
    let report = validator.check(board.table());
    log::info!("board checked in {:?} ({} words)", Instant::now() - start, report.runs.len());

    print!("{}", board);
    println!();

    let n_shown = conf.n_shown.unwrap_or(report.runs.len());
    for (run, ok) in report.runs.iter().take(n_shown) {
        println!(
            "{:<15} {:>8} {}  {}",
            run.word(),
            run.start.0.to_string(),
            match run.start.1 {
                bananagraml::Direction::Horizontal => "→",
                bananagraml::Direction::Vertical => "↓",
            },
            if *ok { "ok" } else { "not a word" },
        );
    }
    if report.runs.len() > n_shown {
        println!("... and {} more", report.runs.len() - n_shown);
    }

    println!();
    println!("{} group(s) of tiles", report.groups);
    for position in &report.isolated {
        println!("tile at {} touches no other tile", position);
    }

    if report.is_valid() {
        println!("valid");
    } else {
        println!("invalid");
        std::process::exit(1);
    }
}


#[test]
fn board_from_rows() {
    use serde::Deserialize;
    use serde::de::IntoDeserializer;
    use serde::de::value::{Error, SeqDeserializer, StrDeserializer};

    let rows: SeqDeserializer<_, Error> = vec!["CAT", ".A.", ".B."].into_deserializer();
    let board = FileOrString::deserialize(rows).unwrap().read_to_string().unwrap();
    assert_eq!(board, "CAT\n.A.\n.B.");
    assert_eq!(Board::parse(&board).len(), 5);

    let text: StrDeserializer<'_, Error> = "CAT".into_deserializer();
    assert_eq!(FileOrString::deserialize(text).unwrap().read_to_string().unwrap(), "CAT");
}
