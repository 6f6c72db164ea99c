//! Shared form fields for the record create and edit pages.

use maud::{Markup, html};
use time::Date;

use crate::html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE};

pub struct RecordFormDefaults {
    pub date: Date,
    /// The latest date the form accepts, normally today in the local timezone.
    pub max_date: Date,
    pub transfer_amount: Option<i64>,
    pub afternoon_shift_amount: Option<i64>,
    pub night_shift_amount: Option<i64>,
    pub system_amount: Option<i64>,
}

pub fn record_form_fields(defaults: &RecordFormDefaults) -> Markup {
    html! {
        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                max=(defaults.max_date)
                value=(defaults.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        (rupiah_field(
            "transfer_amount",
            "Transfer",
            defaults.transfer_amount,
            true,
        ))
        (rupiah_field(
            "afternoon_shift_amount",
            "Afternoon Shift",
            defaults.afternoon_shift_amount,
            false,
        ))
        (rupiah_field(
            "night_shift_amount",
            "Night Shift",
            defaults.night_shift_amount,
            false,
        ))
        (rupiah_field(
            "system_amount",
            "System Total",
            defaults.system_amount,
            false,
        ))
    }
}

fn rupiah_field(name: &str, label: &str, value: Option<i64>, autofocus: bool) -> Markup {
    let value_str = value.map(|amount| amount.to_string());

    html! {
        div
        {
            label
                for=(name)
                class=(FORM_LABEL_STYLE)
            {
                (label)
            }

            div class="input-wrapper w-full"
            {
                input
                    name=(name)
                    id=(name)
                    type="number"
                    step="1"
                    min="0"
                    placeholder="0"
                    required
                    value=[value_str.as_deref()]
                    autofocus[autofocus]
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }
    }
}

#[cfg(test)]
mod record_form_fields_tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use super::{RecordFormDefaults, record_form_fields};

    fn render_defaults() -> Html {
        let markup = record_form_fields(&RecordFormDefaults {
            date: date!(2025 - 08 - 30),
            max_date: date!(2025 - 08 - 30),
            transfer_amount: Some(150_000),
            afternoon_shift_amount: None,
            night_shift_amount: None,
            system_amount: None,
        });

        Html::parse_fragment(&markup.into_string())
    }

    #[test]
    fn renders_date_input_with_value_and_max() {
        let html = render_defaults();

        let selector = Selector::parse("input[type=date]").unwrap();
        let input = html.select(&selector).next().expect("no date input");
        assert_eq!(input.value().attr("value"), Some("2025-08-30"));
        assert_eq!(input.value().attr("max"), Some("2025-08-30"));
    }

    #[test]
    fn renders_all_four_amount_inputs() {
        let html = render_defaults();

        let selector = Selector::parse("input[type=number]").unwrap();
        let names: Vec<_> = html
            .select(&selector)
            .filter_map(|input| input.value().attr("name"))
            .collect();

        assert_eq!(
            names,
            vec![
                "transfer_amount",
                "afternoon_shift_amount",
                "night_shift_amount",
                "system_amount"
            ]
        );
    }

    #[test]
    fn amount_inputs_reject_negative_values_client_side() {
        let html = render_defaults();

        let selector = Selector::parse("input[type=number]").unwrap();
        for input in html.select(&selector) {
            assert_eq!(input.value().attr("min"), Some("0"));
            assert_eq!(input.value().attr("step"), Some("1"));
        }
    }

    #[test]
    fn prefills_known_amounts() {
        let html = render_defaults();

        let selector = Selector::parse("input[name=transfer_amount]").unwrap();
        let input = html.select(&selector).next().expect("no transfer input");
        assert_eq!(input.value().attr("value"), Some("150000"));
    }
}
