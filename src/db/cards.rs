use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::models::Card;

/// Read every card in review order. A row that fails validation (for example a
/// blank question written by another tool) fails the whole read, which the
/// store treats the same as any other malformed file.
pub fn fetch_cards(conn: &Connection) -> Result<Vec<Card>> {
    let mut stmt = conn
        .prepare("SELECT question, answer FROM cards ORDER BY position")
        .context("failed to prepare card query")?;

    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .context("failed to load cards")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect cards")?;

    rows.into_iter()
        .map(|(question, answer)| {
            Card::new(&question, &answer).context("stored card failed validation")
        })
        .collect()
}

/// Overwrite the stored deck with `cards`. The table is dropped and recreated
/// inside one transaction, so a file with a stale or foreign `cards` schema is
/// replaced rather than patched.
pub fn replace_cards(conn: &mut Connection, cards: &[Card]) -> Result<()> {
    let tx = conn.transaction().context("failed to begin transaction")?;

    tx.execute("DROP TABLE IF EXISTS cards", [])
        .context("failed to drop cards table")?;
    tx.execute(
        "CREATE TABLE cards (
            position INTEGER PRIMARY KEY,
            question TEXT NOT NULL,
            answer TEXT NOT NULL
        )",
        [],
    )
    .context("failed to create cards table")?;

    {
        let mut stmt = tx
            .prepare("INSERT INTO cards (position, question, answer) VALUES (?1, ?2, ?3)")
            .context("failed to prepare card insert")?;
        for (position, card) in cards.iter().enumerate() {
            stmt.execute(params![position as i64, card.question(), card.answer()])
                .context("failed to insert card")?;
        }
    }

    tx.commit().context("failed to commit deck")
}
