use comfy_table::Table;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::proration::{DailyAmountScreen, MonthlyDailyCostScreen, PeriodAmountScreen};

pub fn format_daily_amount_screen(screen: &DailyAmountScreen) -> String {
    let mut components = vec![title(&format!("Fixed expenses for {}", screen.date))];

    let content = if !screen.breakdown.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Name", "Daily amount"]);

        for entry in screen.breakdown.iter() {
            table.add_row(vec![entry.name.clone(), figure(&entry.daily_amount)]);
        }
        table.add_row(vec!["Total".to_string(), figure(&screen.total)]);

        table.to_string()
    } else {
        "No fixed expenses on this date".to_string()
    };
    components.push(content);

    components.push(format!("Release: {}", env!("RELEASE")));

    components.join("\n\n")
}

pub fn format_period_amount_screen(screen: &PeriodAmountScreen) -> String {
    let components = vec![
        title(&format!(
            "Fixed expenses from {} to {}",
            screen.period.start_date, screen.period.end_date,
        )),
        format!("Total for this period: {}", figure(&screen.total)),
        format!("Release: {}", env!("RELEASE")),
    ];

    components.join("\n\n")
}

pub fn format_monthly_daily_cost_screen(screen: &MonthlyDailyCostScreen) -> String {
    let mut components = vec![title(&format!(
        "Monthly commitments daily cost on {}",
        screen.date
    ))];

    let content = if !screen.breakdown.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Name", "Monthly amount", "Daily cost"]);

        for entry in screen.breakdown.iter() {
            table.add_row(vec![
                entry.name.clone(),
                figure(&entry.monthly_amount),
                figure(&entry.daily_amount),
            ]);
        }
        table.add_row(vec![
            "Total".to_string(),
            "".to_string(),
            figure(&screen.total),
        ]);

        table.to_string()
    } else {
        "No monthly commitments are active today".to_string()
    };
    components.push(content);

    components.push(format!("Release: {}", env!("RELEASE")));

    components.join("\n\n")
}

// Calculations keep full precision; rounding happens here, at the edge
fn figure(value: &Decimal) -> String {
    return value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
        .to_string();
}

fn title(string: &str) -> String {
    let string_length = string.len();
    string.to_string() + "\n" + &"=".repeat(string_length)
}
