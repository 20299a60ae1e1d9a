//! Integration tests for the CSV directory store.

use sheetsql::{sheet_record, Config, CsvStore, Query, SheetRecord, Sheets};
use std::fs;
use tempfile::tempdir;

sheet_record! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Product {
        #[column = "SKU"]
        pub sku: String,
        #[column = "Price"]
        pub price: f64,
        #[column = "Stock"]
        pub stock: i32,
        #[column = "Active"]
        pub active: bool,
    }
}

const PRODUCTS: &str = "SKU,Price,Stock,Active,Notes\n\
A-1,9.5,10,TRUE,first\n\
A-2,19.99,0,FALSE,\n\
B-1,120,3,TRUE,bulk\n";

fn setup() -> (tempfile::TempDir, Sheets<CsvStore>) {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("inventory.csv"), PRODUCTS).unwrap();

    let mut config = Config::default();
    config.register("Products", "inventory.csv");
    config.save(dir.path()).unwrap();

    let store = CsvStore::open(dir.path()).unwrap();
    (dir, Sheets::new(store))
}

#[test]
fn test_numeric_comparison_on_string_cells() {
    let (_dir, sheets) = setup();
    // "120" > "19.99" numerically even though it sorts lower as text
    let found: Vec<Product> = sheets.query("SELECT * FROM Products WHERE Price > 10").unwrap();

    let skus: Vec<&str> = found.iter().map(|p| p.sku.as_str()).collect();
    assert_eq!(skus, vec!["A-2", "B-1"]);
}

#[test]
fn test_bind_typed_fields() {
    let (_dir, sheets) = setup();
    let found: Vec<Product> = sheets
        .select(&Query::from_table("Products").filter("SKU", "=", "A-1"))
        .unwrap();

    assert_eq!(
        found,
        vec![Product {
            sku: "A-1".into(),
            price: 9.5,
            stock: 10,
            active: true,
        }]
    );
}

#[test]
fn test_insert_then_update_then_delete() {
    let (dir, mut sheets) = setup();
    let product = Product {
        sku: "C-9".into(),
        price: 4.25,
        stock: 7,
        active: false,
    };
    sheets.insert("Products", &product).unwrap();

    let restock = Product {
        stock: 50,
        ..product.clone()
    };
    let updated = sheets
        .update_sql("UPDATE Products SET Stock = 50 WHERE SKU = 'C-9'", &restock)
        .unwrap();
    assert_eq!(updated, 1);

    let content = fs::read_to_string(dir.path().join("inventory.csv")).unwrap();
    assert!(content.ends_with("C-9,4.25,50,false,\n"));

    // Cells hold "TRUE" and "false"; LIKE compares case-insensitively
    let deleted = sheets.delete_sql("DELETE FROM Products WHERE Active LIKE 'true'").unwrap();
    assert_eq!(deleted, 2);

    let left: Vec<Product> = sheets.query("SELECT * FROM Products").unwrap();
    let skus: Vec<&str> = left.iter().map(|p| p.sku.as_str()).collect();
    assert_eq!(skus, vec!["A-2", "C-9"]);
}

#[test]
fn test_update_keeps_unbound_columns() {
    let (dir, mut sheets) = setup();
    let change = Product {
        sku: "B-1".into(),
        price: 99.0,
        stock: 3,
        active: true,
    };
    sheets
        .update(&Query::from_table("Products").filter("SKU", "=", "B-1"), &change)
        .unwrap();

    let content = fs::read_to_string(dir.path().join("inventory.csv")).unwrap();
    assert!(content.contains("B-1,99,3,true,bulk\n"));
}

#[test]
fn test_schema_column_names() {
    let columns: Vec<&str> = Product::schema().iter().map(|b| b.column).collect();
    assert_eq!(columns, vec!["SKU", "Price", "Stock", "Active"]);
}
