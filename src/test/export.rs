#[cfg(test)]
mod tests {
    use std::fs::File;

    use rust_decimal_macros::dec;
    use tempfile::NamedTempFile;

    use crate::{
        app::utils::{export_summary_csv, read_summary_csv, write_summary_csv},
        models::{AssetKind, ValuationRow},
    };

    fn sample_rows() -> Vec<ValuationRow> {
        vec![
            ValuationRow::new(
                "Parag Parikh Flexi Cap Fund".to_string(),
                AssetKind::Equity,
                dec!(5000),
                dec!(5000.00),
                dec!(0.00),
            ),
            ValuationRow::new(
                "Embassy Office Parks REIT".to_string(),
                AssetKind::Reit,
                dec!(20100),
                dec!(20100),
                dec!(0),
            ),
            ValuationRow::new(
                "Fund, with a comma".to_string(),
                AssetKind::Debt,
                dec!(25000),
                dec!(24987.31),
                dec!(-12.69),
            ),
        ]
    }

    #[test]
    fn writes_header_and_rows() {
        let mut buffer = Vec::new();
        write_summary_csv(&sample_rows(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Asset,Type,Invested,Current Value,Gain/Loss");
        assert_eq!(lines[1], "Parag Parikh Flexi Cap Fund,Equity,5000,5000.00,0.00");
        assert_eq!(lines[2], "Embassy Office Parks REIT,REIT,20100,20100,0");
        assert_eq!(lines[3], "\"Fund, with a comma\",Debt,25000,24987.31,-12.69");
    }

    #[test]
    fn export_then_import_round_trips() {
        let rows = sample_rows();
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        export_summary_csv(&rows, path).unwrap();
        let imported = read_summary_csv(File::open(path).unwrap()).unwrap();

        assert_eq!(imported, rows);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let csv = "Asset,Type,Invested,Current Value,Gain/Loss\nGold,Commodity,1,1,0\n";

        let err = read_summary_csv(csv.as_bytes()).unwrap_err();

        assert!(err.to_string().contains("Commodity"));
    }

    #[test]
    fn bad_amount_is_rejected() {
        let csv = "Asset,Type,Invested,Current Value,Gain/Loss\nFund,Equity,lots,1,0\n";

        assert!(read_summary_csv(csv.as_bytes()).is_err());
    }
}
