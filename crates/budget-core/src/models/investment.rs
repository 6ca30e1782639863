use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Investment {
    pub id_investment: String,
    pub balance: f64,
    pub month_revenue: f64,
    /// Date as sent by the server
    pub last_update_date: String,
    pub investment_type: InvestmentType,
    pub location: InvestmentLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct InvestmentType {
    pub id_investment_type: String,
    pub description: String,
}

/// Institution holding the investment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct InvestmentLocation {
    pub id_location: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_investment() {
        let json = r#"{"id_investment":"i1","balance":1000.0,"month_revenue":12.5,"last_update_date":"2024-05-31","investment_type":{"id_investment_type":"t1","description":"CDB"},"location":{"id_location":"l1","description":"Bank"}}"#;
        let investment: Investment = serde_json::from_str(json).unwrap();

        assert_eq!(investment.investment_type.description, "CDB");
        assert_eq!(investment.location.description, "Bank");
        assert_eq!(investment.month_revenue, 12.5);
    }
}
