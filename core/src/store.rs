//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database.
//! The engine calls store methods — nothing else executes SQL.
//! Weekly action records are append-only: one row per (run, week,
//! player), replaced only through the edit-moves flow while the week
//! is still open.

use crate::action::ValidatedAction;
use crate::error::EngineResult;
use crate::event::EventLogEntry;
use crate::player::Player;
use crate::snapshot::EconomySnapshot;
use crate::types::{Day, PlayerId, RunId, Week};
use rusqlite::{params, Connection, OptionalExtension};

pub struct GameStore {
    conn: Connection,
}

/// One player's persisted weekly move.
#[derive(Debug, Clone)]
pub struct ActionRecord {
    pub id: String,
    pub run_id: RunId,
    pub week: Week,
    pub player_id: PlayerId,
    pub action: ValidatedAction,
    pub submitted_day: Day,
}

impl GameStore {
    pub fn open(path: &str) -> EngineResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> EngineResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> EngineResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_foundation.sql"))?;
        self.conn
            .execute_batch(include_str!("../../migrations/002_players_actions.sql"))?;
        Ok(())
    }

    // ── Runs ───────────────────────────────────────────────────

    pub fn insert_run(&self, run_id: &str, seed: u64, version: &str) -> EngineResult<()> {
        self.conn.execute(
            "INSERT INTO runs (run_id, seed, version) VALUES (?1, ?2, ?3)",
            params![run_id, seed as i64, version],
        )?;
        Ok(())
    }

    // ── Event log ──────────────────────────────────────────────

    pub fn append_event(&self, entry: &EventLogEntry) -> EngineResult<()> {
        self.conn.execute(
            "INSERT INTO event_log (run_id, day, event_type, payload)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                entry.run_id,
                entry.day as i64,
                entry.event_type,
                entry.payload,
            ],
        )?;
        Ok(())
    }

    pub fn events_for_day(&self, run_id: &str, day: Day) -> EngineResult<Vec<EventLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, run_id, day, event_type, payload
             FROM event_log WHERE run_id = ?1 AND day = ?2
             ORDER BY id ASC",
        )?;
        let entries = stmt
            .query_map(params![run_id, day as i64], |row| {
                Ok(EventLogEntry {
                    id: Some(row.get(0)?),
                    run_id: row.get(1)?,
                    day: row.get::<_, i64>(2)? as u64,
                    event_type: row.get(3)?,
                    payload: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// The full (event_type, payload) sequence of a run, in log order.
    /// Used by the determinism test and replay tooling.
    pub fn event_sequence(&self, run_id: &str) -> EngineResult<Vec<(String, String)>> {
        let mut stmt = self.conn.prepare(
            "SELECT event_type, payload FROM event_log
             WHERE run_id = ?1 ORDER BY id ASC",
        )?;
        let rows = stmt
            .query_map(params![run_id], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    // ── Players ────────────────────────────────────────────────

    pub fn upsert_player(&self, run_id: &str, player: &Player) -> EngineResult<()> {
        let investments = serde_json::to_string(&player.investments)?;
        let defense = serde_json::to_string(&player.defense)?;
        self.conn.execute(
            "INSERT INTO players (run_id, player_id, name, soldiers, defense, investments)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT (run_id, player_id) DO UPDATE SET
                 name = excluded.name,
                 soldiers = excluded.soldiers,
                 defense = excluded.defense,
                 investments = excluded.investments",
            params![run_id, player.id, player.name, player.soldiers, defense, investments],
        )?;
        Ok(())
    }

    pub fn player(&self, run_id: &str, player_id: &str) -> EngineResult<Option<Player>> {
        let row = self
            .conn
            .query_row(
                "SELECT player_id, name, soldiers, defense, investments
                 FROM players WHERE run_id = ?1 AND player_id = ?2",
                params![run_id, player_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, i64>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;
        match row {
            None => Ok(None),
            Some((id, name, soldiers, defense, investments)) => Ok(Some(Player {
                id,
                name,
                soldiers: soldiers as u32,
                defense: serde_json::from_str(&defense)?,
                investments: serde_json::from_str(&investments)?,
            })),
        }
    }

    /// The full roster, for targeting. Stable player_id order.
    pub fn roster(&self, run_id: &str) -> EngineResult<Vec<Player>> {
        let mut stmt = self.conn.prepare(
            "SELECT player_id, name, soldiers, defense, investments
             FROM players WHERE run_id = ?1 ORDER BY player_id ASC",
        )?;
        let rows = stmt
            .query_map(params![run_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter()
            .map(|(id, name, soldiers, defense, investments)| {
                Ok(Player {
                    id,
                    name,
                    soldiers: soldiers as u32,
                    defense: serde_json::from_str(&defense)?,
                    investments: serde_json::from_str(&investments)?,
                })
            })
            .collect()
    }

    // ── Weekly action records ──────────────────────────────────

    pub fn insert_action(&self, record: &ActionRecord) -> EngineResult<()> {
        let payload = serde_json::to_string(&record.action)?;
        self.conn.execute(
            "INSERT INTO actions (id, run_id, week, player_id, payload, submitted_day)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.id,
                record.run_id,
                record.week as i64,
                record.player_id,
                payload,
                record.submitted_day as i64,
            ],
        )?;
        Ok(())
    }

    /// Replace the payload of an existing weekly record in place.
    /// The caller has already checked the week is still open.
    pub fn replace_action(&self, record: &ActionRecord) -> EngineResult<()> {
        let payload = serde_json::to_string(&record.action)?;
        self.conn.execute(
            "UPDATE actions SET payload = ?1, submitted_day = ?2
             WHERE run_id = ?3 AND week = ?4 AND player_id = ?5",
            params![
                payload,
                record.submitted_day as i64,
                record.run_id,
                record.week as i64,
                record.player_id,
            ],
        )?;
        Ok(())
    }

    pub fn action_for_week(
        &self,
        run_id: &str,
        week: Week,
        player_id: &str,
    ) -> EngineResult<Option<ActionRecord>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, payload, submitted_day FROM actions
                 WHERE run_id = ?1 AND week = ?2 AND player_id = ?3",
                params![run_id, week as i64, player_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, i64>(2)?,
                    ))
                },
            )
            .optional()?;
        match row {
            None => Ok(None),
            Some((id, payload, submitted_day)) => Ok(Some(ActionRecord {
                id,
                run_id: run_id.to_string(),
                week,
                player_id: player_id.to_string(),
                action: serde_json::from_str(&payload)?,
                submitted_day: submitted_day as u64,
            })),
        }
    }

    pub fn action_count(&self, run_id: &str) -> EngineResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM actions WHERE run_id = ?1",
            params![run_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn action_count_for_week(&self, run_id: &str, week: Week) -> EngineResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM actions WHERE run_id = ?1 AND week = ?2",
            params![run_id, week as i64],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    // ── Economy snapshots ──────────────────────────────────────

    pub fn save_snapshot(&self, snapshot: &EconomySnapshot) -> EngineResult<()> {
        let payload = serde_json::to_string(snapshot)?;
        self.conn.execute(
            "INSERT INTO economy_snapshots (run_id, week, payload) VALUES (?1, ?2, ?3)
             ON CONFLICT (run_id, week) DO UPDATE SET payload = excluded.payload",
            params![snapshot.run_id, snapshot.week as i64, payload],
        )?;
        Ok(())
    }

    pub fn snapshot_for_week(
        &self,
        run_id: &str,
        week: Week,
    ) -> EngineResult<Option<EconomySnapshot>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM economy_snapshots
                 WHERE run_id = ?1 AND week = ?2",
                params![run_id, week as i64],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        match payload {
            None => Ok(None),
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        }
    }

    pub fn latest_snapshot(&self, run_id: &str) -> EngineResult<Option<EconomySnapshot>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM economy_snapshots
                 WHERE run_id = ?1 ORDER BY week DESC LIMIT 1",
                params![run_id],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        match payload {
            None => Ok(None),
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        }
    }
}
