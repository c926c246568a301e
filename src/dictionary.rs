use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use fst::{Set, SetBuilder};

use super::GameError;

// uppercased and trimmed, blank entries skipped, sorted and without duplicates
fn normalize(words: impl Iterator<Item=String>) -> Vec<String> {
    let mut words: Vec<String> = words
        .map(|w| w.trim().to_uppercase())
        .filter(|w| !w.is_empty())
        .collect();
    words.sort_unstable();
    words.dedup();
    words
}

// `words` must already be sorted and unique, as `SetBuilder` needs it
fn build_set(words: Vec<String>) -> Result<Set<Vec<u8>>, GameError> {
    let mut build = SetBuilder::memory();
    build.extend_iter(words)?;
    Ok(build.into_set())
}

/// Reads one word per line, uppercased and trimmed, blank lines skipped
///
/// The result is sorted and without duplicates, as `SetBuilder` needs it
pub fn read_words(reader: impl BufRead) -> Result<Vec<String>, GameError> {
    let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
    Ok(normalize(lines.into_iter()))
}

/// An in memory dictionary, the words do not need to be sorted or uppercase
pub fn from_words<S: AsRef<str>>(words: impl IntoIterator<Item=S>) -> Result<Set<Vec<u8>>, GameError> {
    build_set(normalize(words.into_iter().map(|w| w.as_ref().to_owned())))
}

/// Loads the dictionary used for the whole session
///
/// `.fst` files are expected to come from `make_fst`, anything else is read as
/// a word list
pub fn load_dictionary(path: impl AsRef<Path>) -> Result<Set<Vec<u8>>, GameError> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("fst") => {
            let start = Instant::now();
            let data = std::fs::read(path)?;
            let dictionary = Set::new(data)?;
            log::info!("dictionary loaded in {:?} ({} words)", Instant::now() - start, dictionary.len());
            Ok(dictionary)
        },
        _ => {
            let start = Instant::now();
            let words = read_words(BufReader::new(File::open(path)?))?;
            log::info!("words loaded in {:?}", Instant::now() - start);

            let start = Instant::now();
            let dictionary = build_set(words)?;
            log::info!("dictionary built in {:?} ({} words)", Instant::now() - start, dictionary.len());
            Ok(dictionary)
        },
    }
}


#[test]
fn normalized_words() {
    let list = "cat\n  Banana \n\nCAT\nzoo\n";
    let words = read_words(list.as_bytes()).unwrap();
    assert_eq!(words, vec!["BANANA", "CAT", "ZOO"]);
}

#[test]
fn in_memory_set() {
    let dict = from_words(vec!["dog", "Cat", "cat"]).unwrap();
    assert_eq!(dict.len(), 2);
    assert!(dict.contains("CAT"));
    assert!(dict.contains("DOG"));
    assert!(!dict.contains("cat"));
}

#[test]
fn load_from_file() {
    let path = std::env::temp_dir().join(format!("bananagraml-words-{}.txt", std::process::id()));
    std::fs::write(&path, "pear\nplum\n").unwrap();
    let dict = load_dictionary(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(dict.contains("PEAR"));
    assert!(dict.contains("PLUM"));
    assert!(matches!(load_dictionary(&path), Err(GameError::Io(_))));
}

#[test]
fn load_precompiled() {
    let path = std::env::temp_dir().join(format!("bananagraml-words-{}.fst", std::process::id()));
    let set = from_words(vec!["cat", "dog"]).unwrap();
    std::fs::write(&path, set.as_fst().as_bytes()).unwrap();
    let dict = load_dictionary(&path).unwrap();

    assert_eq!(dict.len(), 2);
    assert!(dict.contains("CAT"));
    assert!(dict.contains("DOG"));
    assert!(!dict.contains("COW"));

    std::fs::write(&path, b"garbage").unwrap();
    let corrupt = load_dictionary(&path);
    std::fs::remove_file(&path).unwrap();
    assert!(matches!(corrupt, Err(GameError::Dictionary(_))));
}
