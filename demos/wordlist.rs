//! Example: loading a word list and querying it with both automaton variants.
//!
//! Reads words from the file given as the first argument, or from a small
//! built-in list, builds a trie and a DAWG and runs the same queries on both.
//!
//! Run with: cargo run --example wordlist -- [path]

use std::io::Cursor;

use liblex::fsa::{LexiconBuilder, Variant, WordSource};
use liblex::{Lexicon, Result};

const BUILTIN: &str = "\
# bakery
BAKE
BAKED
BAKER
BAKES
CAKE
CAKED
FAKE
LAKE
MAKE
";

fn load(variant: Variant, path: Option<&str>) -> Result<Lexicon> {
    let source = match path {
        Some(path) => WordSource::path(path),
        None => WordSource::reader(Cursor::new(BUILTIN)),
    };
    LexiconBuilder::new().variant(variant).source(source).build()
}

fn report(lexicon: &Lexicon) -> Result<()> {
    println!(
        "{:?}: {} words, {} nodes",
        lexicon.variant(),
        lexicon.word_count(),
        lexicon.len()
    );

    println!("  Word lookup:");
    for word in ["BAKE", "BAKER", "BAKING", "MAKE"] {
        println!("    {word}: {}", if lexicon.contains(word) { "yes" } else { "no" });
    }

    println!("  Wildcards:");
    for pattern in ["?AKE", "BAKE?", "*ED"] {
        println!("    {pattern}: {:?}", lexicon.search(pattern)?);
    }

    println!("  Prefix CAK: {:?}", lexicon.search_with_prefix("CAK"));
    println!("  Within 1 of BIKE: {:?}", lexicon.search_within_distance("BIKE", 1));
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let path = std::env::args().nth(1);
    for variant in [Variant::Trie, Variant::Dawg] {
        let lexicon = load(variant, path.as_deref())?;
        report(&lexicon)?;
    }
    Ok(())
}
