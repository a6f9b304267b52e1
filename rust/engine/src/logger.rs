use std::fs::{create_dir_all, File};
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::engine::Engine;
use crate::hand::{Category, HandScore};
use crate::showdown::ShowdownResult;

/// Represents a betting street in Texas Hold'em poker.
/// Defines the four stages of a poker hand.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    /// Before flop (hole cards dealt)
    Preflop,
    /// After flop (3 community cards)
    Flop,
    /// After turn (4th community card)
    Turn,
    /// After river (5th community card)
    River,
}

impl Street {
    pub fn name(self) -> &'static str {
        match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        }
    }

    pub fn next(self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }

}

/// A seat as it stood at the end of a hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatRecord {
    pub id: usize,
    pub hole: Vec<Card>,
    pub folded: bool,
    /// Final score, absent for seats that folded before being scored
    #[serde(default)]
    pub score: Option<HandScore>,
    pub wagered: u32,
}

/// Complete record of a hand including seats, board cards, and outcome.
/// Serialized to JSONL format for hand history storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: YYYYMMDD-NNNNNN)
    pub hand_id: String,
    /// RNG seed used for deck shuffling (enables deterministic replay)
    pub seed: Option<u64>,
    pub seats: Vec<SeatRecord>,
    /// Community cards on the board (up to 5 cards)
    pub board: Vec<Card>,
    /// Chips in the pot before it was awarded
    pub pot: u32,
    /// Timestamp when the hand was played (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
    /// Additional metadata (extensible JSON object)
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
    /// Showdown information if the hand was resolved
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
}

/// Information about the showdown phase when hands are revealed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    /// List of player IDs who won the hand
    pub winners: Vec<usize>,
    /// Winning category, absent when everyone else folded
    #[serde(default)]
    pub category: Option<Category>,
    /// Optional notes about the showdown (e.g., "split pot", "uncontested")
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<&ShowdownResult> for ShowdownInfo {
    fn from(r: &ShowdownResult) -> Self {
        let notes = if r.is_uncontested() {
            Some("uncontested".to_string())
        } else if r.is_split() {
            Some(format!("split pot {} ways", r.winners.len()))
        } else {
            None
        };
        Self {
            winners: r.winners.clone(),
            category: r.category,
            notes,
        }
    }
}

impl HandRecord {
    /// Snapshots the engine's seats and board. Call before `showdown()` so the
    /// pot is still intact, then attach the result with [`HandRecord::with_showdown`].
    pub fn capture(hand_id: String, engine: &Engine) -> Self {
        let seats = engine
            .players()
            .iter()
            .map(|p| SeatRecord {
                id: p.id,
                hole: p.hole.map(|h| h.to_vec()).unwrap_or_default(),
                folded: !p.is_active(),
                score: p.score.clone(),
                wagered: p.wagered,
            })
            .collect();
        Self {
            hand_id,
            seed: Some(engine.seed()),
            seats,
            board: engine.board().to_vec(),
            pot: engine.pot(),
            ts: None,
            meta: None,
            showdown: None,
        }
    }

    pub fn with_showdown(mut self, result: &ShowdownResult) -> Self {
        self.showdown = Some(result.into());
        self
    }
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

pub struct HandLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl HandLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// A logger that numbers hands for `date` but writes nothing.
    pub fn in_memory(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}

/// Reads JSONL hand records, skipping blank lines.
pub fn read_records<R: BufRead>(reader: R) -> std::io::Result<Vec<HandRecord>> {
    let mut out = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        out.push(serde_json::from_str(&line).map_err(std::io::Error::other)?);
    }
    Ok(out)
}
