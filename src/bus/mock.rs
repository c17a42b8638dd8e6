//! Scripted I2C link for tests.
//!
//! Backed by a 256-entry register file with auto-increment, records every
//! transaction, and can be told to misbehave.

use super::{I2cLink, Transfer};

/// One transaction as seen on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    Write(Vec<u8>),
    WriteRead { tx: Vec<u8>, len: usize },
}

#[derive(Debug)]
pub struct MockLink {
    registers: Vec<u8>,
    transactions: Vec<Transaction>,
    writes_seen: usize,
    short_write_on: Option<usize>,
    fail_writes: bool,
    nack_address: bool,
    read_limit: Option<usize>,
}

impl MockLink {
    pub fn new() -> Self {
        Self {
            registers: vec![0; 256],
            transactions: Vec::new(),
            writes_seen: 0,
            short_write_on: None,
            fail_writes: false,
            nack_address: false,
            read_limit: None,
        }
    }

    /// Preload consecutive registers starting at `start`
    pub fn load(&mut self, start: u8, bytes: &[u8]) {
        for (i, byte) in bytes.iter().enumerate() {
            self.registers[start.wrapping_add(i as u8) as usize] = *byte;
        }
    }

    pub fn register(&self, addr: u8) -> u8 {
        self.registers[addr as usize]
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn clear_transactions(&mut self) {
        self.transactions.clear();
    }

    /// The `index`-th plain write (0-based) is accepted with 0 bytes
    pub fn short_write_on(&mut self, index: usize) {
        self.short_write_on = Some(index);
    }

    pub fn fail_writes(&mut self) {
        self.fail_writes = true;
    }

    pub fn nack_address(&mut self) {
        self.nack_address = true;
    }

    pub fn limit_reads(&mut self, max: usize) {
        self.read_limit = Some(max);
    }
}

impl Default for MockLink {
    fn default() -> Self {
        Self::new()
    }
}

impl I2cLink for MockLink {
    type Error = String;

    fn write(&mut self, bytes: &[u8]) -> Result<usize, String> {
        self.transactions.push(Transaction::Write(bytes.to_vec()));
        let index = self.writes_seen;
        self.writes_seen += 1;

        if self.fail_writes {
            return Err("device did not ack (nack)".to_string());
        }
        if self.short_write_on == Some(index) {
            return Ok(0);
        }
        if let Some((&start, payload)) = bytes.split_first() {
            self.load(start, payload);
        }
        Ok(bytes.len())
    }

    fn write_read(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<Transfer, String> {
        self.transactions.push(Transaction::WriteRead {
            tx: tx.to_vec(),
            len: rx.len(),
        });

        if self.nack_address {
            return Ok(Transfer::default());
        }
        let start = tx.first().copied().unwrap_or(0);
        let count = self.read_limit.map_or(rx.len(), |max| max.min(rx.len()));
        for (i, slot) in rx.iter_mut().take(count).enumerate() {
            *slot = self.registers[start.wrapping_add(i as u8) as usize];
        }
        Ok(Transfer {
            written: tx.len(),
            read: count,
        })
    }
}
