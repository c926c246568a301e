
use fst::SetBuilder;

use std::fs::File;
use std::io::{
    BufReader,
    BufWriter,
};
use std::time::Instant;

use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "make_fst", about = "Create a fst file from a word list, for faster loading of the dictionary")]
struct Opt {
    /// The input list. One word per line, in any case
    #[structopt(short = "i", long = "input-list", parse(from_os_str))]
    list_file: PathBuf,

    /// The output in which to store the compressed dictionary
    #[structopt(short = "o", long = "output-fst", parse(from_os_str))]
    fst_file: PathBuf,
}

fn main() {
    simple_logger::SimpleLogger::new().with_level(log::LevelFilter::Info).init().unwrap();

    let Opt { list_file, fst_file } = Opt::from_args();

    let start = Instant::now();
    let file = BufReader::new(File::open(list_file).expect("opening the words list file"));
    let words = bananagraml::dictionary::read_words(file).expect("reading the word list");
    log::info!("{} words loaded and sorted in {:?}", words.len(), Instant::now() - start);

    let start = Instant::now();
    let wtr = BufWriter::new(File::create(fst_file).expect("create the words fst file"));
    let mut build = SetBuilder::new(wtr).expect("builder writing to fst file");
    build.extend_iter(words).expect("inserting the words");
    build.finish().expect("writing the fst file");
    log::info!("dictionary written in {:?}", Instant::now() - start);
}
