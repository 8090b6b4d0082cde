mod common;

use std::sync::Arc;
use std::time::Duration;

use common::*;
use logscope_core::{ClientError, ContractMetadata, MetadataError};
use logscope_evm::ContractAbi;
use logscope_pipeline::MetadataResolver;

fn resolver(chain: MockChain) -> MetadataResolver {
    MetadataResolver::new(Arc::new(chain), Arc::new(ContractAbi::erc20().unwrap()))
}

#[tokio::test]
async fn resolves_name_and_symbol() {
    let r = resolver(MockChain::new().with_contract(USDC, MockContract::token("USD Coin", "USDC")));
    assert_eq!(r.resolve(USDC).await, ContractMetadata::new("USD Coin", "USDC"));
}

#[tokio::test]
async fn both_calls_failing_is_unknown() {
    let r = resolver(MockChain::new().with_contract(PAIR, MockContract::default()));
    assert!(r.resolve(PAIR).await.is_unknown());
}

#[tokio::test]
async fn one_call_failing_is_still_fully_unknown() {
    let contract = MockContract {
        name: Some("Half Token".into()),
        symbol: None,
        delay: Duration::ZERO,
    };
    let r = resolver(MockChain::new().with_contract(PAIR, contract));

    let meta = r.resolve(PAIR).await;
    assert_eq!(meta.name, "Unknown");
    assert_eq!(meta.symbol, "Unknown");

    match r.try_resolve(PAIR).await {
        Err(MetadataError::Call { method, source: ClientError::Rpc { code: 3, .. }, .. }) => {
            assert_eq!(method, "symbol")
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn account_without_code_is_unknown() {
    // eth_call to an EOA returns empty data, which does not decode as a string
    let r = resolver(MockChain::new());
    assert!(matches!(r.try_resolve(USER).await, Err(MetadataError::Abi(_))));
    assert!(r.resolve(USER).await.is_unknown());
}

#[tokio::test]
async fn slow_call_times_out() {
    let r = resolver(MockChain::new().with_contract(
        USDC,
        MockContract::token("USD Coin", "USDC").delayed(Duration::from_millis(200)),
    ))
    .with_call_timeout(Some(Duration::from_millis(20)));

    assert!(matches!(
        r.try_resolve(USDC).await,
        Err(MetadataError::Timeout { ms: 20, .. })
    ));
    assert!(r.resolve(USDC).await.is_unknown());
}

#[tokio::test]
async fn abi_without_symbol_is_unknown() {
    let abi = ContractAbi::from_json(
        r#"[{"name":"name","type":"function","inputs":[],
             "outputs":[{"name":"","type":"string"}],"stateMutability":"view"}]"#,
    )
    .unwrap();
    let chain = MockChain::new().with_contract(USDC, MockContract::token("USD Coin", "USDC"));
    let r = MetadataResolver::new(Arc::new(chain), Arc::new(abi));

    assert!(matches!(r.try_resolve(USDC).await, Err(MetadataError::Abi(_))));
    assert!(r.resolve(USDC).await.is_unknown());
}
