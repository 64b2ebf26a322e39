use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::ApiError;

const RESTAURANT_COLUMNS: &str =
    "id, name, description, cuisine, location, phone, rating, open_hours, delivery_options";

/// A value bound to a query placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Float(f64),
}

/// Restaurant columns that accept exact-match filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExactColumn {
    Cuisine,
    Location,
    DeliveryOptions,
}

impl ExactColumn {
    fn as_sql(self) -> &'static str {
        match self {
            ExactColumn::Cuisine => "cuisine",
            ExactColumn::Location => "location",
            ExactColumn::DeliveryOptions => "delivery_options",
        }
    }
}

/// One ORDER BY term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    NameAsc,
    NameDesc,
    RatingAsc,
    RatingDesc,
    DeliveryOptionsAsc,
}

impl SortKey {
    /// Parses a `sort` token; only the four public keys are recognized
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim() {
            "name_asc" => Some(SortKey::NameAsc),
            "name_desc" => Some(SortKey::NameDesc),
            "rating_asc" => Some(SortKey::RatingAsc),
            "rating_desc" => Some(SortKey::RatingDesc),
            _ => None,
        }
    }

    /// Parses a comma-separated list, skipping unknown tokens
    pub fn parse_list(csv: &str) -> Vec<Self> {
        csv.split(',').filter_map(Self::parse).collect()
    }

    /// Maps the `sortBy` parameter of the sort endpoint
    pub fn from_sort_by(value: &str) -> Option<Self> {
        match value {
            "rating" => Some(SortKey::RatingDesc),
            "deliveryOptions" => Some(SortKey::DeliveryOptionsAsc),
            _ => None,
        }
    }

    fn as_sql(self) -> &'static str {
        match self {
            SortKey::NameAsc => "name ASC",
            SortKey::NameDesc => "name DESC",
            SortKey::RatingAsc => "rating ASC",
            SortKey::RatingDesc => "rating DESC",
            SortKey::DeliveryOptionsAsc => "delivery_options ASC",
        }
    }
}

/// Typed restaurant filter shared by every list endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantFilter {
    pub cuisine: Option<String>,
    pub min_rating: Option<f64>,
    pub location: Option<String>,
    pub delivery_options: Option<String>,
    pub keywords: Option<String>,
    pub sort: Vec<SortKey>,
}

/// SQL query builder for the restaurants table
/// Only fixed column names, operators and placeholders ever reach the query text
pub struct SQLQueryBuilder {
    base_query: String,
    where_clauses: Vec<String>,
    params: Vec<SqlParam>,
    order_terms: Vec<&'static str>,
}

impl SQLQueryBuilder {
    pub fn new() -> Self {
        Self {
            base_query: format!("SELECT {} FROM restaurants", RESTAURANT_COLUMNS),
            where_clauses: Vec::new(),
            params: Vec::new(),
            order_terms: Vec::new(),
        }
    }

    /// Builder preloaded with every predicate and sort key of `filter`
    pub fn from_filter(filter: &RestaurantFilter) -> Self {
        let mut builder = Self::new();

        if let Some(cuisine) = &filter.cuisine {
            builder.add_exact_filter(ExactColumn::Cuisine, cuisine);
        }
        if let Some(rating) = filter.min_rating {
            builder.add_min_rating(rating);
        }
        if let Some(location) = &filter.location {
            builder.add_exact_filter(ExactColumn::Location, location);
        }
        if let Some(delivery) = &filter.delivery_options {
            builder.add_exact_filter(ExactColumn::DeliveryOptions, delivery);
        }
        if let Some(keywords) = &filter.keywords {
            builder.add_keyword_filter(keywords);
        }
        for key in &filter.sort {
            builder.add_sort(*key);
        }

        builder
    }

    fn push_param(&mut self, param: SqlParam) -> usize {
        self.params.push(param);
        self.params.len()
    }

    pub fn add_exact_filter(&mut self, column: ExactColumn, value: &str) {
        let index = self.push_param(SqlParam::Text(value.to_string()));
        self.where_clauses
            .push(format!("{} = ${}", column.as_sql(), index));
    }

    /// Inclusive lower bound on rating
    pub fn add_min_rating(&mut self, rating: f64) {
        let index = self.push_param(SqlParam::Float(rating));
        self.where_clauses.push(format!("rating >= ${}", index));
    }

    /// Case-insensitive substring match against name or description
    /// LIKE wildcards in the keyword match literally
    pub fn add_keyword_filter(&mut self, keywords: &str) {
        let pattern = format!("%{}%", escape_like(keywords));
        let index = self.push_param(SqlParam::Text(pattern));
        self.where_clauses.push(format!(
            "(name ILIKE ${0} OR description ILIKE ${0})",
            index
        ));
    }

    pub fn add_sort(&mut self, key: SortKey) {
        self.order_terms.push(key.as_sql());
    }

    /// Returns the query text and its bound values in placeholder order
    pub fn build(&self) -> (String, Vec<SqlParam>) {
        let mut query = self.base_query.clone();

        if !self.where_clauses.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&self.where_clauses.join(" AND "));
        }

        if !self.order_terms.is_empty() {
            query.push_str(" ORDER BY ");
            query.push_str(&self.order_terms.join(", "));
        }

        (query, self.params.clone())
    }
}

impl Default for SQLQueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Trims a string parameter; empty or whitespace-only counts as absent
fn normalize_string(s: Option<String>) -> Option<String> {
    s.and_then(|s| {
        let trimmed = s.trim().to_string();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    })
}

fn parse_rating(raw: Option<String>) -> Result<Option<f64>, ApiError> {
    let Some(raw) = normalize_string(raw) else {
        return Ok(None);
    };

    match raw.parse::<f64>() {
        Ok(rating) if rating.is_finite() => Ok(Some(rating)),
        _ => Err(ApiError::ValidationError(format!(
            "rating must be a number, got '{}'",
            raw
        ))),
    }
}

/// Query parameters of GET /api/restaurants
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Exact cuisine match
    pub cuisine: Option<String>,
    /// Minimum rating (inclusive)
    pub rating: Option<String>,
    /// Exact location match
    pub location: Option<String>,
    /// Comma-separated sort keys: name_asc, name_desc, rating_asc, rating_desc
    pub sort: Option<String>,
}

impl ListParams {
    pub fn into_filter(self) -> Result<RestaurantFilter, ApiError> {
        Ok(RestaurantFilter {
            cuisine: normalize_string(self.cuisine),
            min_rating: parse_rating(self.rating)?,
            location: normalize_string(self.location),
            sort: self
                .sort
                .as_deref()
                .map(SortKey::parse_list)
                .unwrap_or_default(),
            ..Default::default()
        })
    }
}

/// Query parameters of GET /api/restaurants/filter
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FilterParams {
    pub cuisine: Option<String>,
    pub deliveryoptions: Option<String>,
}

impl FilterParams {
    pub fn into_filter(self) -> RestaurantFilter {
        RestaurantFilter {
            cuisine: normalize_string(self.cuisine),
            delivery_options: normalize_string(self.deliveryoptions),
            ..Default::default()
        }
    }
}

/// Query parameters of GET /api/restaurants/search
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Substring looked up in name and description
    pub keywords: Option<String>,
    pub cuisine: Option<String>,
    pub location: Option<String>,
}

impl SearchParams {
    pub fn into_filter(self) -> RestaurantFilter {
        RestaurantFilter {
            keywords: normalize_string(self.keywords),
            cuisine: normalize_string(self.cuisine),
            location: normalize_string(self.location),
            ..Default::default()
        }
    }
}

/// Query parameters of GET /api/restaurants/sort
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SortParams {
    /// `rating` or `deliveryOptions`
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
}

impl SortParams {
    pub fn into_filter(self) -> Result<RestaurantFilter, ApiError> {
        let requested = self.sort_by.unwrap_or_default();
        let key = SortKey::from_sort_by(&requested)
            .ok_or_else(|| ApiError::InvalidSort(requested.clone()))?;

        Ok(RestaurantFilter {
            sort: vec![key],
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sql_builder_basic_query() {
        let (query, params) = SQLQueryBuilder::new().build();

        assert_eq!(
            query,
            "SELECT id, name, description, cuisine, location, phone, rating, open_hours, delivery_options FROM restaurants"
        );
        assert!(params.is_empty());
    }

    #[test]
    fn test_sql_builder_exact_filters() {
        let mut builder = SQLQueryBuilder::new();
        builder.add_exact_filter(ExactColumn::Cuisine, "Italian");
        builder.add_exact_filter(ExactColumn::Location, "Downtown");
        let (query, params) = builder.build();

        assert!(query.ends_with(" WHERE cuisine = $1 AND location = $2"));
        assert_eq!(
            params,
            vec![
                SqlParam::Text("Italian".to_string()),
                SqlParam::Text("Downtown".to_string())
            ]
        );
    }

    #[test]
    fn test_sql_builder_min_rating_bound_as_float() {
        let mut builder = SQLQueryBuilder::new();
        builder.add_min_rating(4.0);
        let (query, params) = builder.build();

        assert!(query.contains("rating >= $1"));
        assert_eq!(params, vec![SqlParam::Float(4.0)]);
    }

    #[test]
    fn test_sql_builder_keyword_reuses_placeholder() {
        let mut builder = SQLQueryBuilder::new();
        builder.add_exact_filter(ExactColumn::Cuisine, "Thai");
        builder.add_keyword_filter("noodle");
        let (query, params) = builder.build();

        assert!(query.contains("(name ILIKE $2 OR description ILIKE $2)"));
        assert_eq!(params.len(), 2);
        assert_eq!(params[1], SqlParam::Text("%noodle%".to_string()));
    }

    #[test]
    fn test_keyword_wildcards_escaped() {
        let mut builder = SQLQueryBuilder::new();
        builder.add_keyword_filter("100%_off\\");
        let (_, params) = builder.build();

        assert_eq!(params[0], SqlParam::Text("%100\\%\\_off\\\\%".to_string()));
    }

    #[test]
    fn test_sql_builder_sort_terms_in_order() {
        let mut builder = SQLQueryBuilder::new();
        builder.add_sort(SortKey::RatingDesc);
        builder.add_sort(SortKey::NameAsc);
        let (query, _) = builder.build();

        assert!(query.ends_with(" ORDER BY rating DESC, name ASC"));
    }

    #[test]
    fn test_sql_builder_combined() {
        let filter = RestaurantFilter {
            cuisine: Some("Italian".to_string()),
            min_rating: Some(3.5),
            location: Some("Downtown".to_string()),
            delivery_options: Some("delivery".to_string()),
            keywords: Some("pasta".to_string()),
            sort: vec![SortKey::NameDesc],
        };
        let (query, params) = SQLQueryBuilder::from_filter(&filter).build();

        assert!(query.contains(
            " WHERE cuisine = $1 AND rating >= $2 AND location = $3 AND delivery_options = $4 AND (name ILIKE $5 OR description ILIKE $5) ORDER BY name DESC"
        ));
        assert_eq!(params.len(), 5);
        assert_eq!(params[1], SqlParam::Float(3.5));
    }

    #[test]
    fn test_parse_sort_list_skips_unknown() {
        assert_eq!(
            SortKey::parse_list("rating_desc,price_asc,name_asc"),
            vec![SortKey::RatingDesc, SortKey::NameAsc]
        );
        assert!(SortKey::parse_list("").is_empty());
        assert!(SortKey::parse_list("bogus").is_empty());
    }

    #[test]
    fn test_sort_by_mapping() {
        assert_eq!(SortKey::from_sort_by("rating"), Some(SortKey::RatingDesc));
        assert_eq!(
            SortKey::from_sort_by("deliveryOptions"),
            Some(SortKey::DeliveryOptionsAsc)
        );
        assert_eq!(SortKey::from_sort_by("name"), None);
    }

    #[test]
    fn test_list_params_normalization() {
        let params = ListParams {
            cuisine: Some("  Italian ".to_string()),
            rating: Some(" ".to_string()),
            location: Some(String::new()),
            sort: Some("rating_desc,name_asc".to_string()),
        };

        let filter = params.into_filter().unwrap();
        assert_eq!(filter.cuisine.as_deref(), Some("Italian"));
        assert_eq!(filter.min_rating, None);
        assert_eq!(filter.location, None);
        assert_eq!(filter.sort, vec![SortKey::RatingDesc, SortKey::NameAsc]);
    }

    #[test]
    fn test_list_params_invalid_rating() {
        for raw in ["four", "NaN", "inf"] {
            let params = ListParams {
                rating: Some(raw.to_string()),
                ..Default::default()
            };
            assert!(matches!(
                params.into_filter(),
                Err(ApiError::ValidationError(_))
            ));
        }
    }

    #[test]
    fn test_sort_params_invalid() {
        let params = SortParams {
            sort_by: Some("price".to_string()),
        };
        assert!(matches!(params.into_filter(), Err(ApiError::InvalidSort(_))));

        assert!(matches!(
            SortParams::default().into_filter(),
            Err(ApiError::InvalidSort(_))
        ));
    }

    #[test]
    fn test_filter_params_ignore_blank_values() {
        let filter = FilterParams {
            cuisine: None,
            deliveryoptions: Some("pickup".to_string()),
        }
        .into_filter();

        assert_eq!(filter.delivery_options.as_deref(), Some("pickup"));
        let (query, _) = SQLQueryBuilder::from_filter(&filter).build();
        assert!(query.ends_with(" WHERE delivery_options = $1"));
    }

    proptest! {
        #[test]
        fn prop_user_input_never_reaches_query_text(
            cuisine in "inj_[a-zA-Z0-9 ';\"%_-]{1,20}",
            location in "inj_[a-zA-Z0-9 ';\"%_-]{1,20}",
            delivery in "inj_[a-zA-Z0-9 ';\"%_-]{1,20}",
            keywords in "inj_[a-zA-Z0-9 ';\"%_-]{1,20}",
            rating in 0.0f64..5.0,
        ) {
            let filter = RestaurantFilter {
                cuisine: Some(cuisine.clone()),
                min_rating: Some(rating),
                location: Some(location.clone()),
                delivery_options: Some(delivery.clone()),
                keywords: Some(keywords),
                sort: vec![SortKey::RatingDesc, SortKey::NameAsc],
            };
            let (query, params) = SQLQueryBuilder::from_filter(&filter).build();

            prop_assert!(!query.contains("inj_"));
            prop_assert!(!query.contains('\''));
            prop_assert!(!query.contains('"'));
            prop_assert!(!query.contains(';'));
            prop_assert_eq!(params.len(), 5);
            prop_assert_eq!(&params[0], &SqlParam::Text(cuisine));
            prop_assert_eq!(&params[1], &SqlParam::Float(rating));
            prop_assert_eq!(&params[2], &SqlParam::Text(location));
            prop_assert_eq!(&params[3], &SqlParam::Text(delivery));
        }

        #[test]
        fn prop_placeholder_count_matches_params(
            cuisine in proptest::option::of("[a-z]{1,8}"),
            location in proptest::option::of("[a-z]{1,8}"),
            rating in proptest::option::of(0.0f64..5.0),
        ) {
            let filter = RestaurantFilter {
                cuisine,
                min_rating: rating,
                location,
                ..Default::default()
            };
            let (query, params) = SQLQueryBuilder::from_filter(&filter).build();

            let placeholders = query.matches('$').count();
            prop_assert_eq!(placeholders, params.len());
            prop_assert_eq!(query.contains(" WHERE "), !params.is_empty());
        }
    }
}
