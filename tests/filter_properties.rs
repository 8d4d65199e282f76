mod common;

use bookhunt::domain::{Genre, Language};
use bookhunt::Event;
use common::{search_body, Host};
use proptest::prelude::*;
use proptest::test_runner::Config;

#[derive(Debug, Clone)]
enum FilterStep {
    NextGenre,
    PrevGenre,
    NextLanguage,
    PrevLanguage,
    Genre(usize),
}

fn step() -> impl Strategy<Value = FilterStep> {
    prop_oneof![
        Just(FilterStep::NextGenre),
        Just(FilterStep::PrevGenre),
        Just(FilterStep::NextLanguage),
        Just(FilterStep::PrevLanguage),
        (0..Genre::ALL.len()).prop_map(FilterStep::Genre),
    ]
}

impl FilterStep {
    fn event(&self) -> Event {
        match self {
            Self::NextGenre => Event::NextGenre,
            Self::PrevGenre => Event::PrevGenre,
            Self::NextLanguage => Event::NextLanguage,
            Self::PrevLanguage => Event::PrevLanguage,
            Self::Genre(i) => Event::SetGenre(Genre::ALL[*i]),
        }
    }
}

proptest! {
    #![proptest_config(Config::with_cases(64))]
    #[test]
    fn filter_changes_reset_to_first_page(steps in prop::collection::vec(step(), 1..12)) {
        let mut host = Host::granted();
        host.respond(0, 200, &search_body("popular", 20, 900));
        host.send(Event::AdvancePage);
        host.respond(0, 200, &search_body("more", 20, 900));
        prop_assert_eq!(host.state.query.page(), 2);

        for step in &steps {
            let before = host.state.query.query().clone();
            host.send(step.event());

            if host.state.query.query() != &before {
                prop_assert_eq!(host.state.query.page(), 1);
                prop_assert!(host.state.results.items().is_empty());
                let in_flight = host.state.results.in_flight().unwrap();
                prop_assert_eq!(in_flight.page, 1);
                prop_assert_eq!(&in_flight.query, host.state.query.query());
            }
        }
    }

    #[test]
    fn language_cycle_returns_to_start(n in 1_usize..40) {
        let mut language = Language::ENGLISH;
        for _ in 0..n {
            language = language.next();
        }
        for _ in 0..n {
            language = language.previous();
        }
        prop_assert_eq!(language, Language::ENGLISH);
    }
}
