use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use dartgust::leaderboard::Leaderboard;
use dartgust::result::TrialResult;
use dartgust::session::ParticipantId;
use dartgust::sim::BatchStats;
use dartgust::timeline::{Block, Timeline};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, cols: std::ops::RangeInclusive<usize>) {
    for i in cols {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

/// Per-trial rows, optionally limited to one block.
pub fn print_trial_table(timeline: &Timeline, results: &[TrialResult], only: Option<Block>) {
    let mut table = new_table();

    table.add_row(vec![
        Cell::new("Block").add_attribute(Attribute::Bold),
        Cell::new("#"),
        Cell::new("Gust").fg(Color::Yellow),
        Cell::new("Intended"),
        Cell::new("Landing"),
        Cell::new("Held"),
        Cell::new("Str"),
        Cell::new("Base"),
        Cell::new("Bonus").fg(Color::Green),
        Cell::new("Zone"),
        Cell::new("Pts").fg(Color::Cyan),
        Cell::new("Total").add_attribute(Attribute::Bold),
    ]);
    align_right(&mut table, 1..=11);

    for (plan, r) in timeline.plans().iter().zip(results) {
        if only.is_some_and(|b| b != plan.block) {
            continue;
        }
        let gust = if r.gust_forced {
            Cell::new(r.gust_target_zone.as_deref().unwrap_or("yes")).fg(Color::Yellow)
        } else {
            Cell::new("")
        };
        table.add_row(vec![
            Cell::new(plan.block.to_string()).add_attribute(Attribute::Bold),
            Cell::new(plan.number),
            gust,
            Cell::new(format!("{:.0},{:.0}", r.intended_x, r.intended_y)),
            Cell::new(format!("{:.0},{:.0}", r.landing_x, r.landing_y)),
            Cell::new(format!("{:.0}", r.held_ms)),
            Cell::new(format!("{:.2}", r.strength_est)),
            Cell::new(r.base_points),
            Cell::new(r.bonus_points).fg(Color::Green),
            Cell::new(r.bonus_zone_hit.as_deref().unwrap_or("")),
            Cell::new(format!("+{}", r.points_earned)).fg(Color::Cyan),
            Cell::new(r.score_total).add_attribute(Attribute::Bold),
        ]);
    }
    println!("\n{}", table);
}

/// Prints the board; `current` gets highlighted when it made the list.
pub fn print_leaderboard(board: &Leaderboard, current: Option<&ParticipantId>) {
    let mut table = new_table();

    table.add_row(vec![
        Cell::new("Rank").add_attribute(Attribute::Bold),
        Cell::new("Participant"),
        Cell::new("Score").fg(Color::Cyan),
    ]);
    align_right(&mut table, 2..=2);

    for (i, entry) in board.entries().iter().enumerate() {
        let mine = current == Some(&entry.id);
        let mut cells = vec![
            Cell::new(i + 1),
            Cell::new(entry.id.as_str()),
            Cell::new(entry.score).fg(Color::Cyan),
        ];
        if mine {
            cells = cells
                .into_iter()
                .map(|c| c.fg(Color::Green).add_attribute(Attribute::Bold))
                .collect();
            cells[1] = Cell::new(format!("{} (you)", entry.id))
                .fg(Color::Green)
                .add_attribute(Attribute::Bold);
        }
        table.add_row(cells);
    }
    println!("\n🏆 Leaderboard (top {})", board.capacity());
    println!("{}", table);
}

pub fn print_batch_stats(stats: &BatchStats) {
    println!(
        "\n📊 {} participants, mean score {:.1}, best {}",
        stats.participants, stats.mean_score, stats.best_score
    );

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Trials").add_attribute(Attribute::Bold),
        Cell::new("Count"),
        Cell::new("Mean pts").fg(Color::Cyan),
        Cell::new("Bonus rate").fg(Color::Green),
    ]);
    align_right(&mut table, 1..=3);

    for (name, count, mean, rate) in [
        (
            "normal",
            stats.normal_trials,
            stats.normal_mean_points,
            stats.normal_bonus_rate,
        ),
        (
            "gust",
            stats.gust_trials,
            stats.gust_mean_points,
            stats.gust_bonus_rate,
        ),
    ] {
        table.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Bold),
            Cell::new(count),
            Cell::new(format!("{:.2}", mean)).fg(Color::Cyan),
            Cell::new(format!("{:.1}%", rate * 100.0)).fg(Color::Green),
        ]);
    }
    println!("{}", table);
}
