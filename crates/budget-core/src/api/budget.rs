//! Typed fetches for expenses, investments and transactions.
//!
//! These only build paths under the configured prefix and decode the
//! result; authentication and error handling live in the gateway.

use chrono::NaiveDate;

use crate::models::{ExpenseCategory, Investment, Transaction};

use super::{ApiClient, ApiError};

/// Date format expected in query parameters
const QUERY_DATE_FORMAT: &str = "%Y-%m-%d";

impl ApiClient {
    fn prefixed(&self, path: &str) -> String {
        format!("{}{}", self.path_prefix(), path)
    }

    /// Fetch all expense categories
    pub async fn fetch_expense_categories(&self) -> Result<Vec<ExpenseCategory>, ApiError> {
        self.get_json(&self.prefixed("/v1/expenses")).await
    }

    /// Fetch investments updated between `start` and `end`
    pub async fn fetch_investments(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Investment>, ApiError> {
        let path = self.prefixed(&format!(
            "/v1/investments?startDate={}&endDate={}",
            start.format(QUERY_DATE_FORMAT),
            end.format(QUERY_DATE_FORMAT)
        ));
        self.get_json(&path).await
    }

    /// Fetch transactions posted on `date`
    pub async fn fetch_transactions(&self, date: NaiveDate) -> Result<Vec<Transaction>, ApiError> {
        let path = self.prefixed(&format!(
            "/v1/transactions?transactionDate={}",
            date.format(QUERY_DATE_FORMAT)
        ));
        self.get_json(&path).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockito::Matcher;

    use super::*;
    use crate::auth::{CredentialStore, MemoryStorage};

    fn client_for(url: String) -> ApiClient {
        let store = Arc::new(CredentialStore::initialized(Arc::new(MemoryStorage::new())));
        store.write(Some("tok".to_string()));
        ApiClient::new(url, store)
            .unwrap()
            .with_path_prefix("/budget/api")
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, QUERY_DATE_FORMAT).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_expense_categories() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/budget/api/v1/expenses")
            .match_header("authorization", "Bearer tok")
            .with_status(200)
            .with_body(r#"[{"id_expense":"1","description":"Rent","planned_value":1200}]"#)
            .create_async()
            .await;

        let expenses = client_for(server.url()).fetch_expense_categories().await.unwrap();

        assert_eq!(
            expenses,
            vec![ExpenseCategory {
                id_expense: "1".to_string(),
                description: "Rent".to_string(),
                planned_value: 1200.0,
            }]
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_investments_builds_date_range() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/budget/api/v1/investments")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("startDate".to_string(), "2024-01-01".to_string()),
                Matcher::UrlEncoded("endDate".to_string(), "2024-03-31".to_string()),
            ]))
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let investments = client_for(server.url())
            .fetch_investments(date("2024-01-01"), date("2024-03-31"))
            .await
            .unwrap();

        assert!(investments.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_transactions() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/budget/api/v1/transactions")
            .match_query(Matcher::UrlEncoded(
                "transactionDate".to_string(),
                "2024-06-15".to_string(),
            ))
            .with_status(200)
            .with_body(
                r#"[{"id_transaction":"t1","description":"Market","value":150.5,"transaction_date":"2024-06-15","expense":{"id_expense":"2","planned_value":800,"description":"Food"}}]"#,
            )
            .create_async()
            .await;

        let transactions = client_for(server.url())
            .fetch_transactions(date("2024-06-15"))
            .await
            .unwrap();

        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].expense.description, "Food");
        assert_eq!(transactions[0].value, 150.5);
        assert_eq!(transactions[0].expense.planned_value, 800.0);
    }

    #[tokio::test]
    async fn test_fetch_with_unexpected_shape() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/budget/api/v1/expenses")
            .with_status(200)
            .with_body(r#"{"items":[]}"#)
            .create_async()
            .await;

        let err = client_for(server.url()).fetch_expense_categories().await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_fetch_propagates_session_expiry() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/budget/api/v1/expenses")
            .with_status(401)
            .create_async()
            .await;

        let client = client_for(server.url());
        let err = client.fetch_expense_categories().await.unwrap_err();

        assert!(err.is_auth_expired());
        assert!(!client.credentials().is_authenticated());
    }
}
