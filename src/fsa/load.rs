//! Populating automata from word lists.
//!
//! A [`WordSource`] is a materialized collection, a lazy iterator, a
//! line-oriented reader or a file path. Readers and files yield one word per
//! line; lines are trimmed, blank lines are skipped and, unless disabled in
//! [`LoadOptions`], so are lines starting with `#`.
//!
//! Only materialized collections are sorted before going into a [`Dawg`];
//! iterators, readers and files must already be in order.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::automaton::{Automaton, Dawg, Trie};
use super::builder::Insertion;
use crate::error::{LexError, Result};

/// Where words come from.
pub enum WordSource<'a> {
    /// A finite collection, sorted first when loading into a DAWG.
    Words(Vec<String>),
    /// A lazy sequence of words, consumed in order.
    Iter(Box<dyn Iterator<Item = String> + 'a>),
    /// A stream with one word per line.
    Reader(Box<dyn BufRead + 'a>),
    /// A text file with one word per line.
    Path(PathBuf),
}

impl<'a> WordSource<'a> {
    /// A source over a finite collection of words.
    pub fn words<I, W>(words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        WordSource::Words(words.into_iter().map(Into::into).collect())
    }

    /// A source over a lazy iterator of words.
    pub fn iter(words: impl Iterator<Item = String> + 'a) -> Self {
        WordSource::Iter(Box::new(words))
    }

    /// A source reading one word per line from `reader`.
    pub fn reader(reader: impl BufRead + 'a) -> Self {
        WordSource::Reader(Box::new(reader))
    }

    /// A source reading one word per line from the file at `path`.
    pub fn path(path: impl AsRef<Path>) -> Self {
        WordSource::Path(path.as_ref().to_path_buf())
    }
}

impl fmt::Debug for WordSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordSource::Words(words) => f.debug_tuple("Words").field(&words.len()).finish(),
            WordSource::Iter(_) => f.write_str("Iter"),
            WordSource::Reader(_) => f.write_str("Reader"),
            WordSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
        }
    }
}

impl From<Vec<String>> for WordSource<'_> {
    fn from(words: Vec<String>) -> Self {
        WordSource::Words(words)
    }
}

impl From<PathBuf> for WordSource<'_> {
    fn from(path: PathBuf) -> Self {
        WordSource::Path(path)
    }
}

impl From<&Path> for WordSource<'_> {
    fn from(path: &Path) -> Self {
        WordSource::path(path)
    }
}

/// Knobs for reading a [`WordSource`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    skip_comments: bool,
    sort_collections: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            skip_comments: true,
            sort_collections: true,
        }
    }
}

impl LoadOptions {
    /// Default options: skip `#` lines, sort collections for a DAWG.
    pub fn new() -> Self {
        LoadOptions::default()
    }

    /// Whether lines starting with `#` are ignored.
    pub fn skip_comments(mut self, skip: bool) -> Self {
        self.skip_comments = skip;
        self
    }

    /// Whether [`WordSource::Words`] is sorted before loading into a DAWG.
    pub fn sort_collections(mut self, sort: bool) -> Self {
        self.sort_collections = sort;
        self
    }
}

/// Returns true if this line is a comment.
pub(crate) fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

impl<S: Insertion> Automaton<S> {
    /// Adds every word of `source` and returns how many non-empty words were read.
    ///
    /// # Errors
    ///
    /// - [`LexError::SourceNotFound`] if a path does not exist.
    /// - [`LexError::UnsupportedSourceType`] if a path is not a regular file.
    /// - [`LexError::InvalidInput`] if a line is not valid UTF-8.
    /// - [`LexError::Io`] on other read failures.
    /// - Any error of [`add`](Self::add), e.g. unsorted input for a DAWG.
    pub fn add_source(&mut self, source: WordSource<'_>, options: &LoadOptions) -> Result<usize> {
        log::debug!("loading {source:?} into {}", S::KIND);
        let added = match source {
            WordSource::Words(mut words) => {
                if S::REQUIRES_SORTED && options.sort_collections {
                    words.sort_unstable();
                }
                self.add_words(words)?
            }
            WordSource::Iter(words) => self.add_words(words)?,
            WordSource::Reader(reader) => self.add_lines(reader, options)?,
            WordSource::Path(path) => {
                let file = open_word_file(&path)?;
                self.add_lines(BufReader::new(file), options)?
            }
        };
        log::debug!(
            "loaded {added} words, {} total, {} nodes",
            self.word_count(),
            self.len()
        );
        Ok(added)
    }

    fn add_words(&mut self, words: impl IntoIterator<Item = String>) -> Result<usize> {
        let mut added = 0;
        for word in words.into_iter().filter(|w| !w.is_empty()) {
            self.add(word)?;
            added += 1;
        }
        Ok(added)
    }

    fn add_lines(&mut self, mut reader: impl BufRead, options: &LoadOptions) -> Result<usize> {
        let mut added = 0;
        let mut line_no = 0usize;
        // Instead of using BufRead::lines() we call read_line repeatedly, which
        // reuses the same string instead of allocating a new one for every line.
        let mut buf = String::with_capacity(80);
        loop {
            line_no += 1;
            match reader.read_line(&mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    return Err(LexError::InvalidInput(format!(
                        "line {line_no} is not valid UTF-8"
                    )));
                }
                Err(e) => return Err(e.into()),
            }
            let word = buf.trim();
            if !word.is_empty() && !(options.skip_comments && is_comment(word)) {
                self.add(word)?;
                added += 1;
            }
            buf.clear();
        }
        Ok(added)
    }
}

fn open_word_file(path: &Path) -> Result<File> {
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LexError::SourceNotFound(path.to_path_buf()),
        _ => e.into(),
    })?;
    if !metadata.is_file() {
        return Err(LexError::UnsupportedSourceType(format!(
            "{} is not a regular file",
            path.display()
        )));
    }
    Ok(File::open(path)?)
}

/// Which automaton a [`LexiconBuilder`] produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    /// A [`Trie`].
    #[default]
    Trie,
    /// A reduced [`Dawg`].
    Dawg,
}

/// A populated automaton of either variant.
#[derive(Debug)]
pub enum Lexicon {
    /// A prefix tree.
    Trie(Trie),
    /// A reduced DAWG.
    Dawg(Dawg),
}

macro_rules! dispatch {
    ($self:ident, $inner:ident => $body:expr) => {
        match $self {
            Lexicon::Trie($inner) => $body,
            Lexicon::Dawg($inner) => $body,
        }
    };
}

impl Lexicon {
    /// Which variant this is.
    pub fn variant(&self) -> Variant {
        match self {
            Lexicon::Trie(_) => Variant::Trie,
            Lexicon::Dawg(_) => Variant::Dawg,
        }
    }

    /// See [`Automaton::contains`].
    pub fn contains(&self, word: &str) -> bool {
        dispatch!(self, a => a.contains(word))
    }

    /// See [`Automaton::contains_prefix`].
    pub fn contains_prefix(&self, prefix: &str) -> bool {
        dispatch!(self, a => a.contains_prefix(prefix))
    }

    /// See [`Automaton::search`].
    ///
    /// # Errors
    ///
    /// [`LexError::InvalidPattern`] for a malformed pattern.
    pub fn search(&self, pattern: &str) -> Result<Vec<String>> {
        dispatch!(self, a => a.search(pattern))
    }

    /// See [`Automaton::search_with_count`].
    ///
    /// # Errors
    ///
    /// [`LexError::InvalidPattern`] for a malformed pattern.
    pub fn search_with_count(&self, pattern: &str) -> Result<Vec<(String, usize)>> {
        dispatch!(self, a => a.search_with_count(pattern))
    }

    /// See [`Automaton::search_with_prefix`].
    pub fn search_with_prefix(&self, prefix: &str) -> Vec<String> {
        dispatch!(self, a => a.search_with_prefix(prefix))
    }

    /// See [`Automaton::search_with_prefix_and_count`].
    pub fn search_with_prefix_and_count(&self, prefix: &str) -> Vec<(String, usize)> {
        dispatch!(self, a => a.search_with_prefix_and_count(prefix))
    }

    /// See [`Automaton::search_within_distance`].
    pub fn search_within_distance(&self, word: &str, max_distance: usize) -> Vec<String> {
        dispatch!(self, a => a.search_within_distance(word, max_distance))
    }

    /// See [`Automaton::search_within_distance_with_count`].
    pub fn search_within_distance_with_count(
        &self,
        word: &str,
        max_distance: usize,
    ) -> Vec<(String, usize)> {
        dispatch!(self, a => a.search_within_distance_with_count(word, max_distance))
    }

    /// See [`Automaton::word_count`].
    pub fn word_count(&self) -> usize {
        dispatch!(self, a => a.word_count())
    }

    /// See [`Automaton::len`].
    pub fn len(&self) -> usize {
        dispatch!(self, a => a.len())
    }

    /// See [`Automaton::is_empty`].
    pub fn is_empty(&self) -> bool {
        dispatch!(self, a => a.is_empty())
    }

    /// The trie, if this is one.
    pub fn as_trie(&self) -> Option<&Trie> {
        match self {
            Lexicon::Trie(trie) => Some(trie),
            Lexicon::Dawg(_) => None,
        }
    }

    /// The DAWG, if this is one.
    pub fn as_dawg(&self) -> Option<&Dawg> {
        match self {
            Lexicon::Dawg(dawg) => Some(dawg),
            Lexicon::Trie(_) => None,
        }
    }
}

/// Builds a populated [`Lexicon`] from a [`WordSource`].
///
/// # Examples
///
/// ```
/// use liblex::fsa::load::{LexiconBuilder, Variant, WordSource};
///
/// let lexicon = LexiconBuilder::new()
///     .variant(Variant::Dawg)
///     .source(WordSource::words(["taps", "tap", "tops", "top"]))
///     .build()
///     .unwrap();
/// assert_eq!(lexicon.len(), 6);
/// assert_eq!(lexicon.search("t?p").unwrap(), ["tap", "top"]);
/// ```
#[derive(Debug, Default)]
pub struct LexiconBuilder<'a> {
    variant: Variant,
    options: LoadOptions,
    source: Option<WordSource<'a>>,
}

impl<'a> LexiconBuilder<'a> {
    /// A builder for a trie with default [`LoadOptions`] and no source yet.
    pub fn new() -> Self {
        LexiconBuilder::default()
    }

    /// Selects the automaton variant.
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Replaces the load options.
    pub fn options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the word source.
    pub fn source(mut self, source: impl Into<WordSource<'a>>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Loads the source into a new automaton; a DAWG is reduced before returning.
    ///
    /// # Errors
    ///
    /// [`LexError::InvalidArgument`] if no source was set, otherwise as
    /// [`Automaton::add_source`].
    pub fn build(self) -> Result<Lexicon> {
        let source = self
            .source
            .ok_or_else(|| LexError::InvalidArgument("no word source given".to_string()))?;
        match self.variant {
            Variant::Trie => {
                let mut trie = Trie::new();
                trie.add_source(source, &self.options)?;
                Ok(Lexicon::Trie(trie))
            }
            Variant::Dawg => {
                let mut dawg = Dawg::new();
                dawg.add_source(source, &self.options)?;
                dawg.reduce();
                Ok(Lexicon::Dawg(dawg))
            }
        }
    }
}

/// Builds a trie from a word list file, one word per line.
///
/// # Errors
///
/// As [`Automaton::add_source`].
pub fn build_trie_from_file(path: impl AsRef<Path>) -> Result<Trie> {
    let mut trie = Trie::new();
    trie.add_source(WordSource::path(path), &LoadOptions::default())?;
    Ok(trie)
}

/// Builds a reduced DAWG from a sorted word list file, one word per line.
///
/// # Examples
///
/// ```no_run
/// use liblex::fsa::load::build_dawg_from_file;
///
/// let dawg = build_dawg_from_file("dictionary.txt").unwrap();
/// ```
///
/// # Errors
///
/// As [`Automaton::add_source`]; unsorted lines give
/// [`LexError::OutOfOrderInsertion`].
pub fn build_dawg_from_file(path: impl AsRef<Path>) -> Result<Dawg> {
    let mut dawg = Dawg::new();
    dawg.add_source(WordSource::path(path), &LoadOptions::default())?;
    dawg.reduce();
    Ok(dawg)
}

/// Builds a trie from an open line-oriented stream.
///
/// # Errors
///
/// As [`Automaton::add_source`].
pub fn build_trie_from_reader(reader: impl BufRead) -> Result<Trie> {
    let mut trie = Trie::new();
    trie.add_source(WordSource::reader(reader), &LoadOptions::default())?;
    Ok(trie)
}

/// Builds a reduced DAWG from an open line-oriented stream of sorted words.
///
/// # Errors
///
/// As [`Automaton::add_source`].
pub fn build_dawg_from_reader(reader: impl BufRead) -> Result<Dawg> {
    let mut dawg = Dawg::new();
    dawg.add_source(WordSource::reader(reader), &LoadOptions::default())?;
    dawg.reduce();
    Ok(dawg)
}

#[cfg(test)]
mod test {
    use std::io::{Cursor, Write};

    use super::*;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn word_file(lines: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(lines.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const WORDS: &str = "ash\nashley\n\n# a comment\n  simpson  \n";

    #[test]
    fn comment_that_starts_with_pound() {
        assert!(is_comment("# This is a comment"));
        assert!(is_comment("        # This is a comment with whitespace"));
        assert!(!is_comment("REVERBERATE"));
        assert!(!is_comment(" REVERBERATE"));
    }

    #[test]
    fn collections_are_sorted_for_dawg() {
        init_logging();
        let mut dawg = Dawg::new();
        let added = dawg
            .add_source(WordSource::words(["kick", "axe"]), &LoadOptions::default())
            .unwrap();
        dawg.reduce();
        assert_eq!(added, 2);
        assert!(dawg.contains("axe"));
        assert!(dawg.contains("kick"));
        assert_eq!(dawg.word_count(), 2);
    }

    #[test]
    fn unsorted_collection_fails_without_sorting() {
        let mut dawg = Dawg::new();
        let options = LoadOptions::new().sort_collections(false);
        let res = dawg.add_source(WordSource::words(["kick", "axe"]), &options);
        assert!(matches!(res, Err(LexError::OutOfOrderInsertion { .. })));
    }

    #[test]
    fn iterators_are_not_sorted() {
        let mut dawg = Dawg::new();
        let words = ["kick", "axe"].into_iter().map(String::from);
        let res = dawg.add_source(WordSource::iter(words), &LoadOptions::default());
        assert!(matches!(res, Err(LexError::OutOfOrderInsertion { .. })));

        let mut trie = Trie::new();
        let words = ["ash", "ashley", "simpson"].into_iter().map(String::from);
        trie.add_source(WordSource::iter(words), &LoadOptions::default())
            .unwrap();
        assert_eq!(trie.word_count(), 3);
    }

    #[test]
    fn duplicates_in_collection_are_counted() {
        let mut dawg = Dawg::new();
        let source = WordSource::words(["ashes", "ash", "ashes", "ashley"]);
        dawg.add_source(source, &LoadOptions::default()).unwrap();
        dawg.reduce();
        assert_eq!(dawg.word_count(), 4);
        assert_eq!(dawg.search_with_prefix_and_count("ashe"), [("ashes".to_string(), 2)]);
    }

    #[test]
    fn reader_lines_are_trimmed_and_filtered() {
        init_logging();
        let trie = build_trie_from_reader(Cursor::new(WORDS)).unwrap();
        assert_eq!(trie.word_count(), 3);
        assert!(trie.contains("simpson"));
        assert!(!trie.contains("# a comment"));

        let mut trie = Trie::new();
        let options = LoadOptions::new().skip_comments(false);
        trie.add_source(WordSource::reader(Cursor::new("#tag\nword\n")), &options)
            .unwrap();
        assert!(trie.contains("#tag"));
    }

    #[test]
    fn invalid_utf8_line_is_invalid_input() {
        let bytes: &[u8] = b"ash\n\xff\xfe\n";
        let res = build_trie_from_reader(bytes);
        match res {
            Err(LexError::InvalidInput(msg)) => assert!(msg.contains("line 2"), "{msg}"),
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    #[test]
    fn files_load_into_both_variants() {
        let file = word_file(WORDS);
        let trie = build_trie_from_file(file.path()).unwrap();
        assert_eq!(trie.word_count(), 3);
        assert!(trie.contains("ashley"));

        let dawg = build_dawg_from_file(file.path()).unwrap();
        assert!(dawg.is_reduced());
        assert_eq!(dawg.word_count(), 3);
        assert_eq!(dawg.search("*s*").unwrap().len(), 3);
    }

    #[test]
    fn unsorted_file_is_rejected_for_dawg() {
        let file = word_file("zulu\nalfa\n");
        assert!(matches!(
            build_dawg_from_file(file.path()),
            Err(LexError::OutOfOrderInsertion { .. })
        ));
    }

    #[test]
    fn missing_file_is_source_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        match build_trie_from_file(&path) {
            Err(LexError::SourceNotFound(p)) => assert_eq!(p, path),
            other => panic!("expected a missing source, got {other:?}"),
        }
    }

    #[test]
    fn directory_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            build_trie_from_file(dir.path()),
            Err(LexError::UnsupportedSourceType(_))
        ));
    }

    #[test]
    fn builder_requires_a_source() {
        assert!(matches!(
            LexiconBuilder::new().variant(Variant::Dawg).build(),
            Err(LexError::InvalidArgument(_))
        ));
    }

    #[test]
    fn builder_selects_variant() {
        let file = word_file(WORDS);
        let lexicon = LexiconBuilder::new()
            .source(file.path())
            .build()
            .unwrap();
        assert_eq!(lexicon.variant(), Variant::Trie);
        assert!(lexicon.as_trie().is_some());
        assert_eq!(lexicon.len(), 14);

        let lexicon = LexiconBuilder::new()
            .variant(Variant::Dawg)
            .source(WordSource::path(file.path()))
            .build()
            .unwrap();
        assert_eq!(lexicon.variant(), Variant::Dawg);
        assert!(lexicon.as_dawg().is_some_and(|d| d.is_reduced()));
        assert_eq!(lexicon.word_count(), 3);
        assert!(lexicon.contains("ash"));
        assert!(lexicon.contains_prefix("simp"));
        assert_eq!(lexicon.search_with_prefix("ash"), ["ash", "ashley"]);
        assert_eq!(lexicon.search_within_distance("asp", 1), ["ash"]);
    }
}
