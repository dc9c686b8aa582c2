use std::fs::{self, File};
use std::io;
use std::path::PathBuf;

use sudoku_engine::{Session, SudokuError, save};

/// Default save location under the platform data directory.
pub fn save_path() -> Result<PathBuf, SudokuError> {
    let base = dirs::data_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no data directory"))?;
    Ok(base.join("sudoku-term").join("save.json"))
}

pub fn store(session: &Session) -> Result<PathBuf, SudokuError> {
    let path = save_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    save::save(session, File::create(&path)?)?;
    Ok(path)
}

pub fn restore() -> Result<Session, SudokuError> {
    let path = save_path()?;
    save::load(File::open(path)?)
}
