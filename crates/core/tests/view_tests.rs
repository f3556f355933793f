// ═══════════════════════════════════════════════════════════════════
// View Tests — sorting, aggregation, formatting, table rendering
// ═══════════════════════════════════════════════════════════════════

use portfolio_tracker_core::config::Market;
use portfolio_tracker_core::models::stock::{SortDir, SortField, StockRow};
use portfolio_tracker_core::view::{
    format_currency, format_num, grand_total, render_table, sort_stocks,
};

fn fixture() -> Vec<StockRow> {
    vec![
        StockRow::new("AAA", 10.0, 5).with_fundamentals(8.0, 1.0, 0.5),
        StockRow::new("BBB", 40.0, 1).with_fundamentals(2.0, 4.0, 3.0),
        StockRow::new("CCC", 5.0, 20).with_fundamentals(6.0, 0.5, 1.5),
        StockRow::new("DDD", 30.0, 2).with_fundamentals(4.0, 2.0, 2.5),
    ]
}

fn tickers(rows: &[StockRow]) -> Vec<&str> {
    rows.iter().map(|r| r.ticker.as_str()).collect()
}

// ═══════════════════════════════════════════════════════════════════
// sort_stocks
// ═══════════════════════════════════════════════════════════════════

mod sorting {
    use super::*;

    #[test]
    fn ascending_by_total() {
        // totals: AAA 50, BBB 40, CCC 100, DDD 60
        let sorted = sort_stocks(&fixture(), SortField::Total, SortDir::Asc);
        assert_eq!(tickers(&sorted), vec!["BBB", "AAA", "DDD", "CCC"]);
    }

    #[test]
    fn descending_is_exactly_reversed() {
        let rows = fixture();
        for field in [
            SortField::Total,
            SortField::Price,
            SortField::Units,
            SortField::Pl,
            SortField::Lpa,
            SortField::Pvpa,
        ] {
            let asc = sort_stocks(&rows, field, SortDir::Asc);
            let mut desc = sort_stocks(&rows, field, SortDir::Desc);
            desc.reverse();
            assert_eq!(tickers(&asc), tickers(&desc), "field {field}");
        }
    }

    #[test]
    fn output_is_a_permutation_of_input() {
        let rows = fixture();
        let sorted = sort_stocks(&rows, SortField::Price, SortDir::Desc);
        assert_eq!(sorted.len(), rows.len());

        let mut input: Vec<&str> = tickers(&rows);
        let mut output: Vec<&str> = tickers(&sorted);
        input.sort_unstable();
        output.sort_unstable();
        assert_eq!(input, output);
    }

    #[test]
    fn sorting_is_idempotent() {
        // A valid total order: re-sorting sorted data changes nothing.
        let once = sort_stocks(&fixture(), SortField::Total, SortDir::Asc);
        let twice = sort_stocks(&once, SortField::Total, SortDir::Asc);
        assert_eq!(tickers(&once), tickers(&twice));
    }

    #[test]
    fn ties_keep_input_order() {
        let rows = vec![
            StockRow::new("FIRST", 10.0, 2),
            StockRow::new("SECOND", 4.0, 5),
            StockRow::new("THIRD", 20.0, 1),
        ];
        // All totals are 20; stable sort must not reorder.
        let sorted = sort_stocks(&rows, SortField::Total, SortDir::Asc);
        assert_eq!(tickers(&sorted), vec!["FIRST", "SECOND", "THIRD"]);
    }

    #[test]
    fn input_is_not_mutated() {
        let rows = fixture();
        let before = tickers(&rows);
        let _ = sort_stocks(&rows, SortField::Total, SortDir::Desc);
        assert_eq!(tickers(&rows), before);
    }
}

// ═══════════════════════════════════════════════════════════════════
// grand_total
// ═══════════════════════════════════════════════════════════════════

mod aggregate {
    use super::*;

    #[test]
    fn sums_all_position_values() {
        assert_eq!(grand_total(&fixture()), 250.0);
    }

    #[test]
    fn empty_set_totals_zero() {
        assert_eq!(grand_total(&[]), 0.0);
    }

    #[test]
    fn summary_is_independent_of_sort_state() {
        let rows = fixture();
        let a = render_table(&rows, SortField::Total, SortDir::Asc, Market::Us);
        let b = render_table(&rows, SortField::Pvpa, SortDir::Desc, Market::Us);
        assert_eq!(a.summary_total, b.summary_total);
        assert_eq!(a.summary_total, "$250.00");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Currency / number formatting
// ═══════════════════════════════════════════════════════════════════

mod formatting {
    use super::*;

    #[test]
    fn us_currency_en_us_locale() {
        assert_eq!(format_currency(1234.56, Market::Us), "$1,234.56");
        assert_eq!(format_currency(0.0, Market::Us), "$0.00");
        assert_eq!(format_currency(1_000_000.0, Market::Us), "$1,000,000.00");
    }

    #[test]
    fn brazil_currency_pt_br_locale() {
        assert_eq!(format_currency(1234.56, Market::Brazil), "R$ 1.234,56");
        assert_eq!(format_currency(3315.0, Market::Brazil), "R$ 3.315,00");
        assert_eq!(format_currency(0.5, Market::Brazil), "R$ 0,50");
    }

    #[test]
    fn negative_values_keep_the_sign() {
        assert_eq!(format_currency(-1234.5, Market::Us), "-$1,234.50");
        assert_eq!(format_currency(-1.0, Market::Brazil), "-R$ 1,00");
    }

    #[test]
    fn ratios_format_with_two_decimals() {
        assert_eq!(format_num(11.2), "11.20");
        assert_eq!(format_num(0.0), "0.00");
        assert_eq!(format_num(-3.456), "-3.46");
    }
}

// ═══════════════════════════════════════════════════════════════════
// render_table
// ═══════════════════════════════════════════════════════════════════

mod rendering {
    use super::*;

    #[test]
    fn rows_are_sorted_and_positions_one_based() {
        let view = render_table(&fixture(), SortField::Total, SortDir::Asc, Market::Us);
        let order: Vec<&str> = view.rows.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(order, vec!["BBB", "AAA", "DDD", "CCC"]);
        let positions: Vec<usize> = view.rows.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1, 2, 3, 4]);
    }

    #[test]
    fn cells_are_formatted_for_the_market() {
        let rows = vec![StockRow::new("TIMS3", 25.5, 130).with_fundamentals(11.2, 1.79, 1.45)];
        let view = render_table(&rows, SortField::Total, SortDir::Asc, Market::Brazil);

        let row = &view.rows[0];
        assert_eq!(row.ticker, "TIMS3");
        assert_eq!(row.units, 130);
        assert_eq!(row.price, "R$ 25,50");
        assert_eq!(row.total, "R$ 3.315,00");
        assert_eq!(row.p_l, "11.20");
        assert_eq!(row.lpa, "1.79");
        assert_eq!(row.p_vpa, "1.45");
        assert_eq!(view.summary_total, "R$ 3.315,00");
    }

    #[test]
    fn ticker_count_matches_row_count() {
        let view = render_table(&fixture(), SortField::Units, SortDir::Desc, Market::Us);
        assert_eq!(view.ticker_count, 4);
        assert_eq!(view.rows.len(), 4);
    }

    #[test]
    fn empty_rows_render_an_empty_table() {
        let view = render_table(&[], SortField::Total, SortDir::Asc, Market::Us);
        assert!(view.rows.is_empty());
        assert_eq!(view.ticker_count, 0);
        assert_eq!(view.summary_total, "$0.00");
    }
}
