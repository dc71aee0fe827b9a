use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use crate::data::{DataError, Table};

use super::model::{parse_cell, Point, Series};

// ---------------------------------------------------------------------------
// Background chart-data builder
// ---------------------------------------------------------------------------
//
// One forward pass over the data rows runs on a worker thread; the owning
// (UI) context is the only writer of chart state and receives each row's
// points as one message, so a row is never half-visible. On completion the
// accumulated points go to the destination series by global index modulo the
// series count. Callers read series by column position, not by run tag, so
// the round-robin order is part of the contract.

/// One message from the worker to the owning context.
enum BuildEvent {
    /// All points of one data row, made visible atomically.
    Row { points: Vec<Point>, rows_done: usize },
    /// The pass failed; everything accumulated so far is discarded.
    Failed(DataError),
    Finished,
}

/// Consumer state of a running (or finished) build.
pub struct ChartBuild {
    rx: Receiver<BuildEvent>,
    total_rows: usize,
    rows_done: usize,
    points: Vec<Point>,
    finished: bool,
}

/// What `poll` observed on the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStatus {
    InProgress,
    Finished,
}

/// Start building points for `table` on a background thread.
///
/// There is no cancellation: the worker runs to completion or fails. The
/// table is moved in, so the pass never races dataset mutations.
pub fn spawn(table: Table) -> ChartBuild {
    let total_rows = table.row_count().saturating_sub(1);
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || scan_rows(&table, &tx));
    ChartBuild {
        rx,
        total_rows,
        rows_done: 0,
        points: Vec::new(),
        finished: false,
    }
}

fn scan_rows(table: &Table, tx: &Sender<BuildEvent>) {
    let header = table.header().to_vec();
    for (i, row) in table.data_rows().iter().enumerate() {
        match row_points(&header, row) {
            Ok(points) => {
                // The receiver going away just ends the pass early.
                if tx
                    .send(BuildEvent::Row {
                        points,
                        rows_done: i + 1,
                    })
                    .is_err()
                {
                    return;
                }
            }
            Err(e) => {
                let _ = tx.send(BuildEvent::Failed(e));
                return;
            }
        }
    }
    let _ = tx.send(BuildEvent::Finished);
}

/// Points for one data row: x from the canonical key, one y per run column,
/// tagged with that column's header cell.
fn row_points(header: &[String], row: &[String]) -> Result<Vec<Point>, DataError> {
    let x = parse_cell(&row[0])?;
    let mut points = Vec::with_capacity(row.len().saturating_sub(1));
    for c in 1..row.len() {
        points.push(Point {
            x,
            y: parse_cell(&row[c])?,
            tag: header.get(c).cloned().unwrap_or_default(),
        });
    }
    Ok(points)
}

impl ChartBuild {
    /// Fraction of rows processed, monotonically increasing to exactly 1.0.
    pub fn progress(&self) -> f64 {
        if self.total_rows == 0 {
            1.0
        } else {
            self.rows_done as f64 / self.total_rows as f64
        }
    }

    /// Progress message derived from `progress`, e.g. `"Loading 42.86%"`.
    pub fn message(&self) -> String {
        format!("Loading {}%", format_percent(self.progress() * 100.0))
    }

    /// Drain everything the worker has sent so far.
    ///
    /// A build failure surfaces here as the builder's error; the partial
    /// point list is dropped and no series is ever touched.
    pub fn poll(&mut self) -> Result<BuildStatus, DataError> {
        loop {
            match self.rx.try_recv() {
                Ok(BuildEvent::Row { points, rows_done }) => {
                    self.points.extend(points);
                    self.rows_done = rows_done;
                }
                Ok(BuildEvent::Finished) => {
                    self.finished = true;
                    return Ok(BuildStatus::Finished);
                }
                Ok(BuildEvent::Failed(e)) => {
                    self.points.clear();
                    return Err(e);
                }
                Err(TryRecvError::Empty) => {
                    return Ok(if self.finished {
                        BuildStatus::Finished
                    } else {
                        BuildStatus::InProgress
                    });
                }
                Err(TryRecvError::Disconnected) => {
                    if self.finished {
                        return Ok(BuildStatus::Finished);
                    }
                    // Worker died without a verdict; treat it as a failed build.
                    self.points.clear();
                    return Err(DataError::format("chart build ended unexpectedly"));
                }
            }
        }
    }

    /// Block until the worker is done and hand back the full point list.
    pub fn wait(mut self) -> Result<Vec<Point>, DataError> {
        loop {
            match self.rx.recv() {
                Ok(BuildEvent::Row { points, rows_done }) => {
                    self.points.extend(points);
                    self.rows_done = rows_done;
                }
                Ok(BuildEvent::Finished) => return Ok(self.points),
                Ok(BuildEvent::Failed(e)) => return Err(e),
                Err(_) => return Err(DataError::format("chart build ended unexpectedly")),
            }
        }
    }

    /// Take the accumulated points once `poll` reported `Finished`.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

/// Distribute built points to the destination series by global index modulo
/// the series count.
pub fn distribute(points: Vec<Point>, series: &mut [Series]) {
    let n = series.len();
    if n == 0 {
        return;
    }
    for (i, point) in points.into_iter().enumerate() {
        series[i % n].points.push(point);
    }
}

/// Percentage with at most two decimals, trailing zeros trimmed.
fn format_percent(value: f64) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}
