//! End-to-end scenarios against the bundled tier dataset

use node_rewards::{
    CalculatorInputs, CalculatorV2Inputs, EXCHANGES, TierTable, calculate_rewards, calculate_rewards_v2,
    exchange_names,
};

fn assert_close(actual: f64, expected: f64) {
    let tolerance = expected.abs().max(1.0) * 1e-9;
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}

fn table() -> TierTable {
    TierTable::bundled().expect("bundled dataset parses")
}

#[test]
fn test_five_year_uniswap_scenario() {
    let table = table();
    let inputs = CalculatorInputs::default();
    assert_eq!(inputs.selected_exchange, "Uniswap");

    let results = calculate_rewards(&table, &inputs, 3500.0);

    let keys = table.cumulative_keys(1);
    assert!(keys > 0);
    assert_eq!(results.cumulative_keys, keys);
    assert_eq!(results.purchase_price, table.purchase_price_eth(1) * 3500.0);

    let monthly_revenue = 61_524_304_906.0 * 0.003;
    assert_close(monthly_revenue, 184_572_914.718);
    assert_close(results.monthly_fee_revenue, monthly_revenue * 0.10 / keys as f64);
    assert_close(results.yearly_fee_revenue, results.monthly_fee_revenue * 12.0);

    let tokens = table.yearly_reward_pool(1) / keys as f64;
    assert_close(results.yearly_tokens, tokens);
    assert_close(results.yearly_reward, tokens * 2.0);
    assert_close(
        results.yearly_apy,
        results.total_yearly_reward / results.purchase_price * 100.0,
    );
}

#[test]
fn test_year_one_meteora_scenario() {
    let table = table();
    let inputs = CalculatorV2Inputs::default().with_quantity(2);
    assert_eq!(inputs.selected_exchange, "Meteora");

    let results = calculate_rewards_v2(&table, &inputs);

    assert_eq!(results.total_investment, table.purchase_price_usd(1) * 2.0);

    let yearly_revenue = 2_796_671_672.0 * 12.0 * 0.003;
    assert_close(yearly_revenue, 100_680_180.192);
    assert_close(results.fee_reward_per_node, yearly_revenue * 0.10 / 2000.0);
    assert_close(results.year1_fee_rewards, results.fee_reward_per_node * 2.0);

    let tokens = table.yearly_reward_pool(1) / 2000.0;
    assert_close(results.year1_tokens_per_node, tokens);
    assert_close(results.base_reward_per_node, tokens * 0.05);
    assert_close(results.year1_total_tokens, tokens * 2.0);
}

#[test]
fn test_lifetime_is_sum_of_five_years() {
    let table = table();
    for tier in table.current_tier_options() {
        let inputs = CalculatorInputs {
            current_tier: tier,
            ..CalculatorInputs::default()
        };
        let results = calculate_rewards(&table, &inputs, 3500.0);

        assert_eq!(results.schedule.len(), 5);
        let years: Vec<u32> = results.schedule.iter().map(|y| y.year).collect();
        assert_eq!(years, vec![1, 2, 3, 4, 5]);

        let reward_sum: f64 = results.schedule.iter().map(|y| y.reward_usd).sum();
        let token_sum: f64 = results.schedule.iter().map(|y| y.tokens_per_node).sum();
        assert_eq!(results.lifetime_reward, reward_sum);
        assert_eq!(results.lifetime_tokens, token_sum);
    }
}

#[test]
fn test_apy_never_negative() {
    let table = table();
    for &fdv in table.expected_fdv_options() {
        for exchange in EXCHANGES.iter() {
            for tier in [1, 25, 50, 51] {
                let v1 = calculate_rewards(
                    &table,
                    &CalculatorInputs {
                        current_tier: tier,
                        purchase_tier: tier,
                        expected_fdv: fdv,
                        ..CalculatorInputs::default()
                    }
                    .with_exchange(exchange.name),
                    3500.0,
                );
                assert!(v1.yearly_apy >= 0.0);

                let v2 = calculate_rewards_v2(
                    &table,
                    &CalculatorV2Inputs {
                        current_tier: tier,
                        expected_fdv: fdv,
                        ..CalculatorV2Inputs::default()
                    }
                    .with_exchange(exchange.name),
                );
                assert!(v2.year1_apy >= 0.0);
            }
        }
    }
}

#[test]
fn test_tier_beyond_dataset_zeroes_everything() {
    let table = table();
    let inputs = CalculatorInputs {
        current_tier: 51,
        purchase_tier: 51,
        ..CalculatorInputs::default()
    };
    let results = calculate_rewards(&table, &inputs, 3500.0);

    assert_eq!(results.cumulative_keys, 0);
    assert_eq!(results.purchase_price, 0.0);
    assert_eq!(results.total_daily_reward, 0.0);
    assert_eq!(results.total_monthly_reward, 0.0);
    assert_eq!(results.total_yearly_reward, 0.0);
    assert_eq!(results.lifetime_reward, 0.0);
    assert_eq!(results.yearly_apy, 0.0);
}

#[test]
fn test_selecting_every_preset() {
    for name in exchange_names() {
        let inputs = CalculatorInputs {
            monthly_volume: 7.0,
            fee_percentage: 0.07,
            ..CalculatorInputs::default()
        }
        .with_exchange(name);

        match EXCHANGES.iter().find(|e| e.name == name) {
            Some(exchange) => {
                assert_eq!(inputs.monthly_volume, exchange.monthly_volume_usd);
                assert_eq!(inputs.fee_percentage, exchange.fee_percent);
            }
            None => {
                assert_eq!(name, "Custom");
                assert_eq!(inputs.monthly_volume, 7.0);
                assert_eq!(inputs.fee_percentage, 0.07);
            }
        }
    }
}

#[test]
fn test_repeated_calls_are_identical() {
    let table = table();

    let inputs = CalculatorInputs::default();
    assert_eq!(
        calculate_rewards(&table, &inputs, 3500.0),
        calculate_rewards(&table, &inputs, 3500.0)
    );

    let inputs = CalculatorV2Inputs::default().with_quantity(3);
    let first = calculate_rewards_v2(&table, &inputs);
    let second = calculate_rewards_v2(&table, &inputs);
    assert_eq!(first.year1_apy.to_bits(), second.year1_apy.to_bits());
    assert_eq!(first, second);
}
