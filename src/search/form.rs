use crate::models::{Make, Model};
use crate::search::filter::{Choice, FilterState, ALL};
use crate::search::query::QueryParams;
use crate::search::types::{Layout, Navigation, SelectOption, SEARCH_PATH};

/// Price breakpoints offered by both price selects, ascending
pub const PRICE_BREAKPOINTS: [u32; 7] = [500, 1000, 5000, 15000, 25000, 50000, 250000];

/// The filter form: makes, models, price bounds and a submit action
#[derive(Debug, Clone)]
pub struct SearchForm {
    pub makes: Vec<Make>,
    /// Models for the make active when the page was loaded
    pub models: Vec<Model>,
    pub layout: Layout,
}

impl SearchForm {
    pub fn new(makes: Vec<Make>, models: Vec<Model>, single_column: bool) -> Self {
        Self {
            makes,
            models,
            layout: Layout::from_single_column(single_column),
        }
    }

    /// Form values seeded from the current URL
    pub fn initial_values(query: &QueryParams) -> FilterState {
        FilterState::from_query(query)
    }

    pub fn make_options(&self, current: &Choice<String>) -> Vec<SelectOption> {
        let current = current.to_string();
        let mut options = vec![SelectOption::new(ALL, "All Makes", &current)];
        options.extend(self.makes.iter().map(|make| {
            SelectOption::new(
                make.make.as_str(),
                format!("{} ({})", make.make, make.count),
                &current,
            )
        }));
        options
    }

    /// Build the navigation for a submitted form; any pagination resets
    pub fn submit(values: &FilterState) -> Navigation {
        let values = FilterState {
            page: 1,
            ..values.clone()
        };

        Navigation {
            pathname: SEARCH_PATH.to_string(),
            query: values.to_query(),
            shallow: true,
        }
    }
}

/// Options for a price select; `unbounded_label` names the sentinel entry
pub fn price_options(unbounded_label: &str, current: &Choice<u32>) -> Vec<SelectOption> {
    let current = current.to_string();
    let mut options = vec![SelectOption::new(ALL, unbounded_label, &current)];
    options.extend(
        PRICE_BREAKPOINTS
            .iter()
            .map(|price| SelectOption::new(price.to_string(), price.to_string(), &current)),
    );
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::query::QueryValue;

    fn form() -> SearchForm {
        SearchForm::new(
            vec![Make::new("Honda", 4), Make::new("Toyota", 7)],
            vec![Model::new("Civic", 3), Model::new("Jazz", 1)],
            false,
        )
    }

    #[test]
    fn initial_values_follow_the_url() {
        let query = QueryParams::parse("make=Toyota&model=Corolla&minPrice=5000&maxPrice=25000");
        let values = SearchForm::initial_values(&query);

        assert_eq!(values.make.to_string(), "Toyota");
        assert_eq!(values.model.to_string(), "Corolla");
        assert_eq!(values.min_price.to_string(), "5000");
        assert_eq!(values.max_price.to_string(), "25000");
    }

    #[test]
    fn initial_values_default_to_all() {
        let values = SearchForm::initial_values(&QueryParams::new());

        assert_eq!(values.make.to_string(), "all");
        assert_eq!(values.model.to_string(), "all");
        assert_eq!(values.min_price.to_string(), "all");
        assert_eq!(values.max_price.to_string(), "all");
    }

    #[test]
    fn make_options_label_counts() {
        let options = form().make_options(&Choice::Only("Toyota".to_string()));

        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["All Makes", "Honda (4)", "Toyota (7)"]);
        assert!(options[2].selected);
        assert!(!options[0].selected);
    }

    #[test]
    fn price_options_are_ascending_after_sentinel() {
        let options = price_options("No Min", &Choice::All);

        assert_eq!(options.len(), PRICE_BREAKPOINTS.len() + 1);
        assert_eq!(options[0].value, "all");
        assert!(options[0].selected);
        assert_eq!(options[1].value, "500");
        assert_eq!(options[7].value, "250000");
    }

    #[test]
    fn submit_resets_page_and_keeps_values() {
        let query = QueryParams::parse("make=Honda&page=3");
        let values = FilterState {
            make: Choice::Only("Toyota".to_string()),
            model: Choice::Only("Corolla".to_string()),
            min_price: Choice::Only(5000),
            max_price: Choice::Only(25000),
            ..SearchForm::initial_values(&query)
        };
        assert_eq!(values.page, 3);

        let navigation = SearchForm::submit(&values);

        assert!(navigation.shallow);
        assert_eq!(navigation.pathname, "/cars");
        assert_eq!(navigation.query.get("page"), QueryValue::Single("1".to_string()));
        assert_eq!(navigation.query.get_str("make"), "Toyota");
        assert_eq!(navigation.query.get_str("model"), "Corolla");
        assert_eq!(navigation.query.get_str("minPrice"), "5000");
        assert_eq!(navigation.query.get_str("maxPrice"), "25000");
        assert_eq!(
            navigation.href(),
            "/cars?make=Toyota&model=Corolla&minPrice=5000&maxPrice=25000&page=1"
        );
    }

    #[test]
    fn layout_follows_flag() {
        assert_eq!(form().layout, Layout::TwoColumn);
        assert_eq!(
            SearchForm::new(vec![], vec![], true).layout,
            Layout::SingleColumn
        );
    }
}
