use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::events::events_in_range;
use crate::db::ordering::ordered_active_staff;
use crate::db::pool::DbPool;
use crate::db::shifts::shifts_in_range;
use crate::errors::{AppError, AppResult};
use crate::models::shift_code::{ALL_CODES, ShiftCode};
use crate::ui::messages::header;
use crate::utils::date;
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

/// The department roster grid: active staff × days of one month.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Roster {
        month,
        full_names,
        csv,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;
        crate::auth::current_user(&pool.conn, cfg)?;

        let first = match month {
            Some(m) => date::parse_month(m).ok_or_else(|| AppError::InvalidMonth(m.clone()))?,
            None => date::month_bounds(&date::today()).0,
        };
        let days = date::month_days(&first);
        let (from, to) = (*days.first().unwrap(), *days.last().unwrap());
        let month_key = date::month_key(&first);

        let staff = ordered_active_staff(&pool.conn, &month_key)?;
        let shifts = shifts_in_range(&pool.conn, &from, &to)?;

        // (user, date) → code map for O(1) cell lookup while rendering.
        let mut grid: HashMap<(i64, NaiveDate), ShiftCode> = HashMap::new();
        for s in &shifts {
            grid.insert((s.user_id, s.date), s.shift_code);
        }

        header(format!("Roster {}", first.format("%B %Y")));
        render_grid(cfg, &staff, &days, &grid, *full_names);

        // Legend
        println!();
        println!("Codes:");
        for code in ALL_CODES {
            println!(
                "  {:<4} {}",
                code.colour().bold().paint(code.code()),
                code.label()
            );
        }

        // Events overlay
        let events = events_in_range(&pool.conn, &from, &to)?;
        if !events.is_empty() {
            println!();
            println!("Events this month:");
            for ev in &events {
                println!("  {} {} [{}]", ev.date.format("%d %b"), ev.title, ev.kind);
            }
        }

        if let Some(file) = csv {
            write_grid_csv(file, &staff, &days, &grid, cfg)?;
            println!();
            println!("Grid written to {file}");
        }
    }
    Ok(())
}

fn render_grid(
    cfg: &Config,
    staff: &[crate::models::user::User],
    days: &[NaiveDate],
    grid: &HashMap<(i64, NaiveDate), ShiftCode>,
    full_names: bool,
) {
    let name_width = staff
        .iter()
        .map(|u| display_name(u, full_names).len())
        .chain(std::iter::once(5))
        .max()
        .unwrap_or(5);

    // Day-of-month header
    print!("{:<width$} ", "STAFF", width = name_width);
    for d in days {
        print!("{:>3} ", d.day());
    }
    println!();

    for user in staff {
        print!("{:<width$} ", display_name(user, full_names), width = name_width);
        for d in days {
            match grid.get(&(user.id, *d)) {
                Some(code) => {
                    // Pad to 3 before colouring so the escape codes do not
                    // break the alignment.
                    let cell = format!("{:>3}", code.code());
                    print!("{} ", code.colour().paint(cell));
                }
                None => print!("{:>3} ", cfg.roster_placeholder),
            }
        }
        println!();
    }
}

fn display_name(user: &crate::models::user::User, full_names: bool) -> String {
    if full_names {
        format!("{} ({})", user.full_name, user.grade)
    } else {
        user.username.clone()
    }
}

fn write_grid_csv(
    file: &str,
    staff: &[crate::models::user::User],
    days: &[NaiveDate],
    grid: &HashMap<(i64, NaiveDate), ShiftCode>,
    cfg: &Config,
) -> AppResult<()> {
    let mut wtr = csv::Writer::from_path(file).map_err(|e| AppError::Export(e.to_string()))?;

    let mut headers = vec!["username".to_string(), "grade".to_string()];
    headers.extend(days.iter().map(|d| d.format("%Y-%m-%d").to_string()));
    wtr.write_record(&headers)
        .map_err(|e| AppError::Export(e.to_string()))?;

    for user in staff {
        let mut row = vec![user.username.clone(), user.grade.clone()];
        for d in days {
            row.push(
                grid.get(&(user.id, *d))
                    .map(|c| c.code().to_string())
                    .unwrap_or_else(|| cfg.roster_placeholder.clone()),
            );
        }
        wtr.write_record(&row)
            .map_err(|e| AppError::Export(e.to_string()))?;
    }

    wtr.flush()?;
    Ok(())
}
