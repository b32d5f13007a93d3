//! Holdings extraction from a parsed N-PORT filing.
//!
//! Filers spell the same field in different ways (case, synonyms, optional
//! nesting), so every logical field is resolved through an ordered list of
//! candidate key paths. The first candidate with a non-empty value wins.

use serde::Serialize;

use crate::xml::{first_node, first_present, KeyPath, Node};

const DEFAULT_CURRENCY: &str = "USD";

const FORM_DATA_PATHS: &[KeyPath] = &[
    &["edgarSubmission", "formData"],
    &["edgarSubmission", "formdata"],
    &["edgarsubmission", "formData"],
    &["edgarsubmission", "formdata"],
];

const GEN_INFO_PATHS: &[KeyPath] = &[&["genInfo"], &["geninfo"]];

const REPORT_DATE_PATHS: &[KeyPath] = &[&["repPdDate"], &["reppddate"], &["reportDate"]];

const INVESTMENT_PATHS: &[KeyPath] = &[
    &["invstOrSecs", "invstOrSec"],
    &["invstorsecs", "invstorsec"],
    &["investments", "investment"],
];

/// A logical field of an investment entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Issuer,
    Ticker,
    Title,
    Balance,
    MarketValue,
    Currency,
    ExchangeRate,
    Cusip,
}

impl Field {
    /// Candidate key paths for this field, in precedence order.
    pub fn candidates(self) -> &'static [KeyPath] {
        match self {
            Field::Name => &[&["name"], &["Name"], &["issuerName"]],
            Field::Issuer => &[&["issuer", "name"], &["issuer", "Name"], &["issuerName"]],
            Field::Ticker => &[&["identifiers", "ticker"], &["ticker"], &["Ticker"]],
            Field::Title => &[&["title"], &["Title"], &["desc"], &["description"]],
            Field::Balance => &[&["balance"], &["Balance"], &["shares"], &["Shares"]],
            Field::MarketValue => &[
                &["valUSD"],
                &["valusd"],
                &["marketValue"],
                &["MarketValue"],
            ],
            Field::Currency => &[
                &["currencyconditional", "curCd"],
                &["currencyconditional", "curcd"],
                &["curCd"],
                &["curcd"],
                &["currencyCode"],
                &["currency"],
            ],
            Field::ExchangeRate => &[
                &["currencyconditional", "exchangeRt"],
                &["currencyconditional", "exchangert"],
                &["exchangeRt"],
                &["exchangert"],
                &["exchangeRate"],
                &["fxRate"],
                &["fxrate"],
            ],
            Field::Cusip => &[&["identifiers", "cusip"], &["cusip"], &["CUSIP"]],
        }
    }
}

/// One matching portfolio position, normalized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub name: String,
    pub issuer: String,
    pub title: String,
    pub shares: f64,
    pub market_value: f64,
    pub price_per_share: f64,
    #[serde(rename = "priceInUSD")]
    pub price_in_usd: f64,
    pub currency: String,
    pub exchange_rate: f64,
    pub report_date: String,
    pub cusip: String,
    pub ticker: String,
}

/// View of one investment entry with field resolution.
struct Entry<'a>(&'a Node);

impl<'a> Entry<'a> {
    fn text(&self, field: Field) -> &'a str {
        first_present(self.0, field.candidates()).unwrap_or_default()
    }

    fn number(&self, field: Field) -> Option<f64> {
        first_present(self.0, field.candidates())
            .and_then(parse_number_prefix)
            .filter(|value| value.is_finite())
    }
}

/// Parse the longest leading decimal number, ignoring trailing text.
///
/// Filers sometimes append units or stray characters (`"100 NS"`), so
/// `"1234.5abc"` reads as `1234.5`. Text without a leading number is `None`.
fn parse_number_prefix(raw: &str) -> Option<f64> {
    let raw = raw.trim_start();
    let bytes = raw.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    raw[..end].parse().ok()
}

/// Extract holdings matching `search_term` from a parsed filing.
///
/// Never fails: a tree without a recognizable form-data container or
/// investment list yields an empty vector. Entries are kept in document
/// order and dropped when:
/// - none of name, issuer or ticker contains the search term
///   (case-insensitive);
/// - balance or market value is missing, unparseable, zero or negative.
pub fn extract_holdings(tree: &Node, search_term: &str) -> Vec<Holding> {
    let Some(form_data) = first_node(tree, FORM_DATA_PATHS) else {
        tracing::debug!("no form data container in filing");
        return Vec::new();
    };

    let report_date = first_node(form_data, GEN_INFO_PATHS)
        .and_then(|gen_info| first_present(gen_info, REPORT_DATE_PATHS))
        .unwrap_or_default();

    let Some(investments) = first_node(form_data, INVESTMENT_PATHS) else {
        tracing::debug!("no investment list in filing");
        return Vec::new();
    };

    let search = search_term.to_lowercase();
    let mut holdings = Vec::new();

    for (index, node) in investments.items().iter().enumerate() {
        if !node.is_object() {
            tracing::warn!(index, "skipping investment entry that is not an object");
            continue;
        }
        if let Some(holding) = holding_from_entry(&Entry(node), &search, report_date) {
            holdings.push(holding);
        }
    }

    holdings
}

fn holding_from_entry(entry: &Entry<'_>, search: &str, report_date: &str) -> Option<Holding> {
    let name = entry.text(Field::Name);
    let issuer = entry.text(Field::Issuer);
    let ticker = entry.text(Field::Ticker);

    let matches = [name, issuer, ticker]
        .iter()
        .any(|value| value.to_lowercase().contains(search));
    if !matches {
        return None;
    }

    let shares = entry.number(Field::Balance).unwrap_or(0.0);
    let market_value = entry.number(Field::MarketValue).unwrap_or(0.0);
    if !(shares > 0.0 && market_value > 0.0) {
        return None;
    }

    let currency = match entry.text(Field::Currency).trim() {
        "" => DEFAULT_CURRENCY.to_string(),
        code => code.to_uppercase(),
    };
    let exchange_rate = entry.number(Field::ExchangeRate).unwrap_or(1.0);

    let price_in_usd = market_value / shares;
    let price_per_share = local_price(price_in_usd, &currency, exchange_rate);

    Some(Holding {
        name: name.to_string(),
        issuer: issuer.to_string(),
        title: entry.text(Field::Title).to_string(),
        shares,
        market_value,
        price_per_share,
        price_in_usd,
        currency,
        exchange_rate,
        report_date: report_date.to_string(),
        cusip: entry.text(Field::Cusip).to_string(),
        ticker: ticker.to_string(),
    })
}

/// Per-share price in the holding's own currency.
///
/// The rate multiplies the USD price, as filed; it is only applied to
/// non-USD holdings with a positive rate other than 1.
fn local_price(price_in_usd: f64, currency: &str, exchange_rate: f64) -> f64 {
    if currency != DEFAULT_CURRENCY && exchange_rate > 0.0 && exchange_rate != 1.0 {
        price_in_usd * exchange_rate
    } else {
        price_in_usd
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_document;
    use pretty_assertions::assert_eq;

    fn filing(investments: &str) -> Node {
        let xml = format!(
            r#"<edgarSubmission xmlns="http://www.sec.gov/edgar/nport">
                <formData>
                    <genInfo><repPdDate>2024-03-31</repPdDate></genInfo>
                    <invstOrSecs>{investments}</invstOrSecs>
                </formData>
            </edgarSubmission>"#
        );
        parse_document(&xml).unwrap()
    }

    const APPLE: &str = r#"<invstOrSec>
        <name>Apple Inc.</name>
        <title>Apple Inc. Common Stock</title>
        <cusip>037833100</cusip>
        <identifiers><ticker value="AAPL"/></identifiers>
        <balance>200</balance>
        <valUSD>34000</valUSD>
        <curCd>USD</curCd>
    </invstOrSec>"#;

    const SAP: &str = r#"<invstOrSec>
        <name>SAP SE</name>
        <balance>10</balance>
        <valUSD>100</valUSD>
        <currencyConditional curCd="eur " exchangeRt="1.1"/>
    </invstOrSec>"#;

    #[test]
    fn test_no_form_data_returns_empty() {
        let tree = parse_document("<other><formData/></other>").unwrap();
        assert!(extract_holdings(&tree, "apple").is_empty());
    }

    #[test]
    fn test_no_investments_returns_empty() {
        let tree = parse_document(
            "<edgarSubmission><formData><genInfo/></formData></edgarSubmission>",
        )
        .unwrap();
        assert!(extract_holdings(&tree, "apple").is_empty());
    }

    #[test]
    fn test_case_insensitive_match_on_name() {
        let holdings = extract_holdings(&filing(APPLE), "apple");
        assert_eq!(holdings.len(), 1);

        let apple = &holdings[0];
        assert_eq!(apple.name, "Apple Inc.");
        assert_eq!(apple.title, "Apple Inc. Common Stock");
        assert_eq!(apple.cusip, "037833100");
        assert_eq!(apple.ticker, "AAPL");
        assert_eq!(apple.report_date, "2024-03-31");
        assert_eq!(apple.currency, "USD");
        assert_eq!(apple.exchange_rate, 1.0);
        assert_eq!(apple.price_in_usd, 170.0);
        assert_eq!(apple.price_per_share, 170.0);
    }

    #[test]
    fn test_match_on_ticker() {
        assert_eq!(extract_holdings(&filing(APPLE), "aapl").len(), 1);
    }

    #[test]
    fn test_title_is_not_searched() {
        assert!(extract_holdings(&filing(APPLE), "common stock").is_empty());
    }

    #[test]
    fn test_foreign_currency_multiplies_rate() {
        let holdings = extract_holdings(&filing(SAP), "sap");
        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0].currency, "EUR");
        assert_eq!(holdings[0].exchange_rate, 1.1);
        assert_eq!(holdings[0].price_in_usd, 10.0);
        assert!((holdings[0].price_per_share - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_usd_ignores_exchange_rate() {
        let entry = r#"<invstOrSec><name>X</name><balance>4</balance><valUSD>10</valUSD>
            <curCd>USD</curCd><exchangeRt>2</exchangeRt></invstOrSec>"#;
        let holdings = extract_holdings(&filing(entry), "x");
        assert_eq!(holdings[0].price_per_share, 2.5);
        assert_eq!(holdings[0].price_in_usd, 2.5);
    }

    #[test]
    fn test_non_positive_numbers_are_dropped() {
        let entries = r#"
            <invstOrSec><name>Short Co</name><balance>-5</balance><valUSD>100</valUSD></invstOrSec>
            <invstOrSec><name>Zero Co</name><balance>5</balance><valUSD>0</valUSD></invstOrSec>
            <invstOrSec><name>Bad Co</name><balance>abc</balance><valUSD>10</valUSD></invstOrSec>
            <invstOrSec><name>Missing Co</name><valUSD>10</valUSD></invstOrSec>
            <invstOrSec><name>Good Co</name><balance>1</balance><valUSD>10</valUSD></invstOrSec>"#;
        let holdings = extract_holdings(&filing(entries), "co");
        let names: Vec<_> = holdings.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Good Co"]);
    }

    #[test]
    fn test_single_entry_equals_list_entry() {
        let single = extract_holdings(&filing(APPLE), "apple");
        let listed = extract_holdings(&filing(&format!("{APPLE}{SAP}")), "apple");
        assert_eq!(single, listed);
    }

    #[test]
    fn test_output_keeps_document_order() {
        let entries = format!("{SAP}{APPLE}");
        let holdings = extract_holdings(&filing(&entries), "");
        let names: Vec<_> = holdings.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["SAP SE", "Apple Inc."]);
    }

    #[test]
    fn test_synonym_fields_and_fallback_container() {
        let xml = r#"<EDGARSUBMISSION><FORMDATA>
            <investments><investment>
                <name>Microsoft Corp</name>
                <shares>3</shares>
                <valusd>900</valusd>
                <description>Common</description>
                <currency>gbp</currency>
                <fxrate>0.8</fxrate>
            </investment></investments>
        </FORMDATA></EDGARSUBMISSION>"#;
        let tree = parse_document(xml).unwrap();
        let holdings = extract_holdings(&tree, "MICROSOFT");
        assert_eq!(holdings.len(), 1);

        let msft = &holdings[0];
        assert_eq!(msft.name, "Microsoft Corp");
        assert_eq!(msft.title, "Common");
        assert_eq!(msft.currency, "GBP");
        assert_eq!(msft.exchange_rate, 0.8);
        assert_eq!(msft.report_date, "");
        assert!((msft.price_per_share - 240.0).abs() < 1e-9);
    }

    fn object(entries: Vec<(&str, Node)>) -> Node {
        Node::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        )
    }

    fn text(value: &str) -> Node {
        Node::Text(value.to_string())
    }

    #[test]
    fn test_camel_case_synonyms_in_tree() {
        let entry = object(vec![
            ("issuerName", text("Microsoft Corp")),
            ("Shares", text("3")),
            ("marketValue", text("900")),
            ("MarketValue", text("1")),
            ("currencyCode", text("gbp")),
            ("fxRate", text("0.8")),
        ]);
        let tree = object(vec![(
            "edgarSubmission",
            object(vec![(
                "formData",
                object(vec![("invstOrSecs", object(vec![("invstOrSec", entry)]))]),
            )]),
        )]);

        let holdings = extract_holdings(&tree, "microsoft");
        assert_eq!(holdings.len(), 1);

        let msft = &holdings[0];
        assert_eq!(msft.name, "Microsoft Corp");
        assert_eq!(msft.issuer, "Microsoft Corp");
        assert_eq!(msft.market_value, 900.0);
        assert_eq!(msft.currency, "GBP");
        assert!((msft.price_per_share - 240.0).abs() < 1e-9);
    }

    #[test]
    fn test_camel_case_tags_are_folded_by_parser() {
        let entry = r#"<invstOrSec><issuerName>Microsoft Corp</issuerName>
            <balance>3</balance><valUSD>900</valUSD></invstOrSec>"#;
        let tree = filing(entry);

        let parsed = tree
            .lookup(&["edgarsubmission", "formdata", "invstorsecs", "invstorsec"])
            .unwrap();
        assert!(parsed.get("issuername").is_some());
        assert!(parsed.get("issuerName").is_none());
        assert!(extract_holdings(&tree, "microsoft").is_empty());
    }

    #[test]
    fn test_numbers_parse_leading_prefix() {
        let entry = r#"<invstOrSec><name>Prefix Co</name><balance>100 NS</balance>
            <valUSD>1234.5abc</valUSD></invstOrSec>"#;
        let holdings = extract_holdings(&filing(entry), "prefix");
        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0].shares, 100.0);
        assert_eq!(holdings[0].market_value, 1234.5);
    }

    #[test]
    fn test_parse_number_prefix() {
        assert_eq!(parse_number_prefix("  42"), Some(42.0));
        assert_eq!(parse_number_prefix("-5.25 units"), Some(-5.25));
        assert_eq!(parse_number_prefix(".5"), Some(0.5));
        assert_eq!(parse_number_prefix("7."), Some(7.0));
        assert_eq!(parse_number_prefix("1.5e3x"), Some(1500.0));
        assert_eq!(parse_number_prefix("2e"), Some(2.0));
        assert_eq!(parse_number_prefix("abc"), None);
        assert_eq!(parse_number_prefix("-"), None);
        assert_eq!(parse_number_prefix("."), None);
        assert_eq!(parse_number_prefix(""), None);
    }

    #[test]
    fn test_issuer_nested_name() {
        let entry = r#"<invstOrSec><name>Class A</name><issuer><name>Alphabet Inc</name></issuer>
            <balance>1</balance><valUSD>5</valUSD></invstOrSec>"#;
        let holdings = extract_holdings(&filing(entry), "alphabet");
        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0].issuer, "Alphabet Inc");
    }

    #[test]
    fn test_non_object_entries_are_skipped() {
        let entries = format!("<invstOrSec>stray text</invstOrSec>{APPLE}");
        let holdings = extract_holdings(&filing(&entries), "apple");
        assert_eq!(holdings.len(), 1);
    }

    #[test]
    fn test_holding_serializes_camel_case() {
        let holdings = extract_holdings(&filing(APPLE), "apple");
        let json = serde_json::to_value(&holdings[0]).unwrap();
        for key in [
            "name",
            "issuer",
            "title",
            "shares",
            "marketValue",
            "pricePerShare",
            "priceInUSD",
            "currency",
            "exchangeRate",
            "reportDate",
            "cusip",
            "ticker",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_local_price_rules() {
        assert_eq!(local_price(10.0, "EUR", 1.1), 10.0 * 1.1);
        assert_eq!(local_price(10.0, "EUR", 1.0), 10.0);
        assert_eq!(local_price(10.0, "EUR", 0.0), 10.0);
        assert_eq!(local_price(10.0, "USD", 2.0), 10.0);
    }
}
