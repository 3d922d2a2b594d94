use std::io::Write;
use tempfile::NamedTempFile;

pub const PRODUCT_HEADER: &str = "product, price, stock";
pub const ACTION_HEADER: &str = "action, order, customer, email, product, quantity, coupon";

pub fn products_file(rows: &[&str]) -> NamedTempFile {
    csv_file(PRODUCT_HEADER, rows)
}

pub fn actions_file(rows: &[&str]) -> NamedTempFile {
    csv_file(ACTION_HEADER, rows)
}

fn csv_file(header: &str, rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{header}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file
}
