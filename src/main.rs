mod cli;
mod period;
mod proration;
mod recurring;
mod vault;

use crate::cli::fixed_expenses_operation;
fn main() {
    fixed_expenses_operation()
}
