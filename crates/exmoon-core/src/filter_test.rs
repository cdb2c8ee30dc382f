use super::*;
use crate::products::tests::make_product;

fn numbered(count: usize) -> Vec<Product> {
    (1..=count)
        .map(|i| make_product(&i.to_string(), "Nike", "9", "Disponible"))
        .collect()
}

fn sample() -> Vec<Product> {
    let mut featured = make_product("4", "Adidas", "10", "Exclusivo");
    featured.featured = true;
    vec![
        make_product("1", "Nike", "9", "Disponible"),
        make_product("2", "Nike", "10", "Agotado"),
        make_product("3", "Puma", "9.5", "Disponible"),
        featured,
        make_product("5", "", "", ""),
    ]
}

fn page_ids<'a>(page: &CatalogPage<'a>) -> Vec<&'a str> {
    page.items.iter().map(|p| p.id.as_str()).collect()
}

// -----------------------------------------------------------------------
// filters
// -----------------------------------------------------------------------

#[test]
fn no_filters_shows_everything() {
    let all = sample();
    let page = view(&all, &CatalogFilters::default(), 1, PageSize::Ten);
    assert_eq!(page.total_items, 5);
    assert_eq!(page.total_pages, 1);
}

#[test]
fn empty_string_filter_counts_as_unset() {
    let all = sample();
    let filters = CatalogFilters {
        brand: Some(String::new()),
        ..CatalogFilters::default()
    };
    assert_eq!(view(&all, &filters, 1, PageSize::Ten).total_items, 5);
}

#[test]
fn brand_filter_is_exact() {
    let all = sample();
    let filters = CatalogFilters {
        brand: Some("Nike".to_string()),
        ..CatalogFilters::default()
    };
    assert_eq!(page_ids(&view(&all, &filters, 1, PageSize::Ten)), vec!["1", "2"]);

    let partial = CatalogFilters {
        brand: Some("Nik".to_string()),
        ..CatalogFilters::default()
    };
    assert_eq!(view(&all, &partial, 1, PageSize::Ten).total_items, 0);
}

#[test]
fn filters_compose_with_and() {
    let all = sample();
    let filters = CatalogFilters {
        brand: Some("Nike".to_string()),
        size: Some("9".to_string()),
        status: Some("Disponible".to_string()),
        tab: CatalogTab::All,
    };
    assert_eq!(page_ids(&view(&all, &filters, 1, PageSize::Ten)), vec!["1"]);
}

#[test]
fn featured_tab_requires_featured_flag() {
    let all = sample();
    let filters = CatalogFilters {
        tab: CatalogTab::Featured,
        ..CatalogFilters::default()
    };
    assert_eq!(page_ids(&view(&all, &filters, 1, PageSize::Ten)), vec!["4"]);
}

#[test]
fn unknown_filter_value_yields_single_empty_page() {
    let all = sample();
    let filters = CatalogFilters {
        status: Some("Reservado".to_string()),
        ..CatalogFilters::default()
    };
    let page = view(&all, &filters, 1, PageSize::Ten);
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 1);
    assert!(!page.has_previous);
    assert!(!page.has_next);
}

#[test]
fn empty_catalog_has_one_page() {
    let page = view(&[], &CatalogFilters::default(), 1, PageSize::Thirty);
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.page, 1);
}

// -----------------------------------------------------------------------
// facets
// -----------------------------------------------------------------------

#[test]
fn facets_are_distinct_sorted_and_non_empty() {
    let facets = facet_options(&sample());
    assert_eq!(facets.brands, vec!["Adidas", "Nike", "Puma"]);
    assert_eq!(facets.sizes, vec!["10", "9", "9.5"]);
    assert_eq!(facets.statuses, vec!["Agotado", "Disponible", "Exclusivo"]);
}

#[test]
fn selecting_a_brand_does_not_shrink_facets() {
    let all = sample();
    let mut state = BrowseState::new();
    let before = facet_options(&all);
    state.set_brand(Some("Puma".to_string()));
    let page = state.view(&all);
    assert_eq!(page.total_items, 1);
    assert_eq!(facet_options(&all), before);
}

// -----------------------------------------------------------------------
// pagination
// -----------------------------------------------------------------------

#[test]
fn twenty_five_items_in_pages_of_ten() {
    let all = numbered(25);
    let last = view(&all, &CatalogFilters::default(), 3, PageSize::Ten);
    assert_eq!(last.total_pages, 3);
    assert_eq!(last.items.len(), 5);
    assert_eq!(last.items[0].id, "21");
    assert!(last.has_previous);
    assert!(!last.has_next);

    let first = view(&all, &CatalogFilters::default(), 1, PageSize::Ten);
    assert!(!first.has_previous);
    assert!(first.has_next);
}

#[test]
fn out_of_range_pages_are_clamped() {
    let all = numbered(25);
    let high = view(&all, &CatalogFilters::default(), 99, PageSize::Ten);
    assert_eq!(high.page, 3);
    let zero = view(&all, &CatalogFilters::default(), 0, PageSize::Ten);
    assert_eq!(zero.page, 1);
    assert_eq!(zero.items.len(), 10);
}

#[test]
fn exact_multiple_does_not_add_an_empty_page() {
    assert_eq!(total_pages(20, PageSize::Ten), 2);
    assert_eq!(total_pages(21, PageSize::Ten), 3);
    assert_eq!(total_pages(0, PageSize::Twenty), 1);
}

#[test]
fn changing_page_size_resets_to_first_page() {
    let all = numbered(25);
    let mut state = BrowseState::new();
    state.next_page(&all);
    state.next_page(&all);
    assert_eq!(state.page(), 3);

    state.set_page_size(PageSize::Twenty);
    assert_eq!(state.page(), 1);
    assert_eq!(state.view(&all).total_pages, 2);
}

#[test]
fn changing_any_filter_resets_to_first_page() {
    let all = numbered(25);
    let mut state = BrowseState::new();

    state.go_to_page(&all, 3);
    state.set_size(Some("9".to_string()));
    assert_eq!(state.page(), 1);

    state.go_to_page(&all, 2);
    state.set_status(None);
    assert_eq!(state.page(), 1);

    state.go_to_page(&all, 2);
    state.set_tab(CatalogTab::Featured);
    assert_eq!(state.page(), 1);
}

#[test]
fn navigation_stops_at_boundaries() {
    let all = numbered(15);
    let mut state = BrowseState::new();
    state.previous_page();
    assert_eq!(state.page(), 1);

    state.next_page(&all);
    state.next_page(&all);
    assert_eq!(state.page(), 2);
}

#[test]
fn go_to_page_clamps_to_available_pages() {
    let all = numbered(12);
    let mut state = BrowseState::with_filters(CatalogFilters::default(), PageSize::Ten);
    state.go_to_page(&all, 7);
    assert_eq!(state.page(), 2);
}

// -----------------------------------------------------------------------
// parsing
// -----------------------------------------------------------------------

#[test]
fn page_size_parses_only_offered_values() {
    assert_eq!("20".parse::<PageSize>().unwrap(), PageSize::Twenty);
    assert_eq!(" 30 ".parse::<PageSize>().unwrap(), PageSize::Thirty);
    assert!("15".parse::<PageSize>().is_err());
    assert!("ten".parse::<PageSize>().is_err());
    assert_eq!(PageSize::default().get(), 10);
}

#[test]
fn page_size_serde_uses_numbers() {
    assert_eq!(serde_json::to_string(&PageSize::Twenty).unwrap(), "20");
    let parsed: PageSize = serde_json::from_str("30").unwrap();
    assert_eq!(parsed, PageSize::Thirty);
    assert!(serde_json::from_str::<PageSize>("25").is_err());
}

#[test]
fn tab_parses() {
    assert_eq!("featured".parse::<CatalogTab>().unwrap(), CatalogTab::Featured);
    assert_eq!("".parse::<CatalogTab>().unwrap(), CatalogTab::All);
    assert!("destacados".parse::<CatalogTab>().is_err());
}
