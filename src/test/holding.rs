#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use strum::IntoEnumIterator;

    use crate::{
        app::utils::{default_holdings, default_reminders, parse_portfolio},
        models::{AssetKind, FundHolding, Holding, HoldingError, HoldingRecord, ReitHolding},
    };

    fn record(json: &str) -> HoldingRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn asset_kind_spelling() {
        let names: Vec<String> = AssetKind::iter().map(|kind| kind.to_string()).collect();

        assert_eq!(
            names,
            vec!["Equity", "Thematic", "REIT", "Debt", "Hybrid", "Liquid"]
        );
        assert_eq!(AssetKind::from_str("REIT").unwrap(), AssetKind::Reit);
        assert!(AssetKind::from_str("Crypto").is_err());
    }

    #[test]
    fn fund_record_converts() {
        let holding = Holding::try_from(record(
            r#"{"Asset": "Axis Liquid Fund", "AMFI Code": "119551", "Amount": 5000, "Type": "Liquid"}"#,
        ))
        .unwrap();

        assert_eq!(
            holding,
            Holding::Fund(FundHolding::new(
                "Axis Liquid Fund".to_string(),
                AssetKind::Liquid,
                "119551".to_string(),
                dec!(5000),
            ))
        );
        assert_eq!(holding.kind(), AssetKind::Liquid);
    }

    #[test]
    fn reit_record_converts() {
        let holding = Holding::try_from(record(
            r#"{"Asset": "Embassy Office Parks REIT", "Price": 335, "Units": 60, "Type": "REIT"}"#,
        ))
        .unwrap();

        assert_eq!(
            holding,
            Holding::Reit(ReitHolding::new(
                "Embassy Office Parks REIT".to_string(),
                dec!(335),
                dec!(60),
            ))
        );
        assert_eq!(holding.kind(), AssetKind::Reit);
    }

    #[test]
    fn reit_without_units_is_rejected() {
        let err = Holding::try_from(record(
            r#"{"Asset": "Some REIT", "Price": 335, "Type": "REIT"}"#,
        ))
        .unwrap_err();

        assert!(matches!(err, HoldingError::MissingUnitPricing { .. }));
    }

    #[test]
    fn reit_worth_more_than_a_decimal_is_rejected() {
        let err = Holding::try_from(record(
            r#"{
                "Asset": "Huge REIT",
                "Price": "79228162514264337593543950335",
                "Units": 2,
                "Type": "REIT"
            }"#,
        ))
        .unwrap_err();

        assert!(matches!(err, HoldingError::ValueOverflow { ref name } if name == "Huge REIT"));
    }

    #[test]
    fn reit_value_is_checked() {
        assert_eq!(
            ReitHolding::new("A".to_string(), dec!(335), dec!(60)).value(),
            Some(dec!(20100))
        );
        assert_eq!(
            ReitHolding::new("B".to_string(), Decimal::MAX, dec!(1.5)).value(),
            None
        );
    }

    #[test]
    fn fund_without_code_is_rejected() {
        let err = Holding::try_from(record(
            r#"{"Asset": "Some Fund", "Amount": 100, "Type": "Debt"}"#,
        ))
        .unwrap_err();

        assert!(matches!(err, HoldingError::MissingSchemePricing { .. }));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = Holding::try_from(record(
            r#"{"Asset": "Gold", "AMFI Code": "1", "Amount": 100, "Type": "Commodity"}"#,
        ))
        .unwrap_err();

        assert_eq!(err.to_string(), "Unknown asset type 'Commodity' for 'Gold'");
    }

    #[test]
    fn portfolio_file_parses() {
        let (holdings, reminders) = parse_portfolio(
            r#"{
                "holdings": [
                    {"Asset": "Parag Parikh Flexi Cap Fund", "AMFI Code": "120503", "Amount": 5000, "Type": "Equity"},
                    {"Asset": "Embassy Office Parks REIT", "Price": 335, "Units": 60, "Type": "REIT"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(holdings.len(), 2);
        assert_eq!(holdings[1].name(), "Embassy Office Parks REIT");
        assert!(reminders.is_empty());
    }

    #[test]
    fn invalid_holding_fails_the_file() {
        let result = parse_portfolio(
            r#"{"holdings": [{"Asset": "X", "Type": "Equity"}], "reminders": ["a"]}"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn sample_file_matches_built_in_portfolio() {
        let (holdings, reminders) =
            parse_portfolio(include_str!("../../sample_data/portfolio.json")).unwrap();

        assert_eq!(holdings, default_holdings());
        assert_eq!(reminders, default_reminders());
    }
}
