//! Buffered training data for one game and its on-disk format.
//!
//! The dump layout is the contract with the trainer and must not drift:
//!
//! ```text
//! i32 total_turns
//! i32 state_size          // floats per state tensor
//! i32 action_space_size   // floats per policy vector
//! repeated total_turns times:
//!     f32[state_size]        state tensor
//!     f32[action_space_size] policy vector
//!     f32                    outcome label (+1.0 / -1.0)
//! ```
//!
//! Everything is little-endian, written back-to-back with no padding or
//! record separators. (The system this format originates from wrote host
//! byte order; this implementation fixes little-endian so dumps are
//! portable.)

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};

/// Per-turn training triples for one finished game.
#[derive(Clone, Debug, PartialEq)]
pub struct GameRecord {
    state_size: usize,
    action_space_size: usize,
    states: Vec<Vec<f32>>,
    policies: Vec<Vec<f32>>,
    outcomes: Vec<f32>,
}

impl GameRecord {
    pub fn new(state_size: usize, action_space_size: usize) -> Self {
        Self {
            state_size,
            action_space_size,
            states: Vec::new(),
            policies: Vec::new(),
            outcomes: Vec::new(),
        }
    }

    /// Appends one turn's state tensor and policy vector. Outcomes are
    /// assigned once the game is over via [`GameRecord::set_outcomes`].
    pub fn push_turn(&mut self, state: Vec<f32>, policy: Vec<f32>) {
        assert_eq!(state.len(), self.state_size, "state tensor length");
        assert_eq!(
            policy.len(),
            self.action_space_size,
            "policy vector length"
        );
        self.states.push(state);
        self.policies.push(policy);
    }

    /// Attaches one ±1 label per recorded turn.
    pub fn set_outcomes(&mut self, outcomes: Vec<f32>) {
        assert_eq!(outcomes.len(), self.states.len(), "one label per turn");
        self.outcomes = outcomes;
    }

    pub fn total_turns(&self) -> usize {
        self.states.len()
    }

    pub fn state_size(&self) -> usize {
        self.state_size
    }

    pub fn action_space_size(&self) -> usize {
        self.action_space_size
    }

    pub fn states(&self) -> &[Vec<f32>] {
        &self.states
    }

    pub fn policies(&self) -> &[Vec<f32>] {
        &self.policies
    }

    pub fn outcomes(&self) -> &[f32] {
        &self.outcomes
    }

    /// Writes the game in the dump format. Failure to open or write is a
    /// recoverable I/O error for the caller; the record itself stays
    /// intact and no retry happens here.
    pub fn dump_to_file(&self, path: &Path) -> Result<()> {
        assert_eq!(
            self.outcomes.len(),
            self.states.len(),
            "dump requires labeled turns"
        );

        let file = File::create(path)
            .with_context(|| format!("cannot open dump file {}", path.display()))?;
        let mut w = BufWriter::new(file);

        write_i32(&mut w, self.total_turns() as i32)?;
        write_i32(&mut w, self.state_size as i32)?;
        write_i32(&mut w, self.action_space_size as i32)?;

        for turn in 0..self.total_turns() {
            write_f32_slice(&mut w, &self.states[turn])?;
            write_f32_slice(&mut w, &self.policies[turn])?;
            write_f32_slice(&mut w, &self.outcomes[turn..=turn])?;
        }

        w.flush().context("flushing dump file")?;
        Ok(())
    }

    /// Reads a file written by [`GameRecord::dump_to_file`].
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("cannot open dump file {}", path.display()))?;
        let mut r = BufReader::new(file);

        let total_turns = read_i32(&mut r)?;
        let state_size = read_i32(&mut r)?;
        let action_space_size = read_i32(&mut r)?;
        if total_turns < 0 || state_size < 0 || action_space_size < 0 {
            bail!("corrupt dump header: {total_turns}/{state_size}/{action_space_size}");
        }

        let mut record = Self::new(state_size as usize, action_space_size as usize);
        let mut outcomes = Vec::with_capacity(total_turns as usize);
        for _ in 0..total_turns {
            let state = read_f32_vec(&mut r, record.state_size)?;
            let policy = read_f32_vec(&mut r, record.action_space_size)?;
            record.push_turn(state, policy);
            outcomes.push(read_f32(&mut r)?);
        }
        record.set_outcomes(outcomes);
        Ok(record)
    }
}

fn write_i32<W: Write>(w: &mut W, value: i32) -> Result<()> {
    w.write_all(&value.to_le_bytes()).context("writing i32")
}

fn write_f32_slice<W: Write>(w: &mut W, values: &[f32]) -> Result<()> {
    for &value in values {
        w.write_all(&value.to_le_bytes()).context("writing f32")?;
    }
    Ok(())
}

fn read_i32<R: Read>(r: &mut R) -> Result<i32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf).context("reading i32")?;
    Ok(i32::from_le_bytes(buf))
}

fn read_f32<R: Read>(r: &mut R) -> Result<f32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf).context("reading f32")?;
    Ok(f32::from_le_bytes(buf))
}

fn read_f32_vec<R: Read>(r: &mut R, len: usize) -> Result<Vec<f32>> {
    let mut values = Vec::with_capacity(len);
    for _ in 0..len {
        values.push(read_f32(r)?);
    }
    Ok(values)
}
