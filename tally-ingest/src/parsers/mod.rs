pub mod capital_one_csv;
