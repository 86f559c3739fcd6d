use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::{Parser, Subcommand};
use itertools::Itertools;
use log::info;

use handle_solver::algorithms::{filter_candidates, rank_guesses};
use handle_solver::{
    Correctness, DecompCache, Dictionary, Dimension, FeedbackMatrix, Guess, DIMENSIONS, WORD_LEN,
};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the idiom dictionary, a JSON object keyed by idiom
    #[clap(short, long, default_value = "idioms.json")]
    dictionary: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive helper: enter guesses and their feedback, get the
    /// candidates that are still possible
    Solve,
    /// Offline analysis: rank guesses by average discriminating power
    Rank {
        /// max number of dictionary entries to score
        #[clap(short, long, default_value_t = 20)]
        limit: usize,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let dictionary = Dictionary::load(&args.dictionary)
        .with_context(|| format!("loading dictionary '{}'", args.dictionary))?;
    info!("loaded {} idioms", dictionary.len());

    match args.command {
        Command::Solve => solve(&dictionary),
        Command::Rank { limit } => {
            rank(&dictionary, limit);
            Ok(())
        }
    }
}

fn rank(dictionary: &Dictionary, limit: usize) {
    for (word, score) in rank_guesses(dictionary, limit) {
        println!("{} {:.2}", word, score);
    }
}

/// One round per loop iteration: a guess, then the four feedback rows in
/// dimension order. Runs until stdin closes; bad input is fatal.
fn solve(dictionary: &Dictionary) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut cache = DecompCache::new();
    let mut history = Vec::new();

    loop {
        let word = match prompt(&mut lines, "你的猜测：\n")? {
            Some(word) => word,
            None => return Ok(()),
        };
        handle_solver::validate_idiom(&word)?;

        let mut cells = [[Correctness::Wrong; WORD_LEN]; DIMENSIONS];
        for dim in Dimension::ALL {
            let text = format!(
                "{}猜测结果（A=没有；B=有，位置错；C=有，位置对）：\n",
                dim.label()
            );
            let row = match prompt(&mut lines, &text)? {
                Some(row) => row,
                None => return Ok(()),
            };
            cells[dim as usize] = Correctness::parse_row(&row)?;
        }

        history.push(Guess {
            word,
            mask: FeedbackMatrix::from_cells(cells),
        });
        let survivors = filter_candidates(dictionary, &history, &mut cache)?;
        info!("{} candidates remain", survivors.len());
        println!("{}", survivors.iter().join(" "));
    }
}

fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    text: &str,
) -> anyhow::Result<Option<String>> {
    print!("{}", text);
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}
