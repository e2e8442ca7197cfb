//! Canonical column names of the flattened candle table and the unified artifact.

/// Canonical date key shared by every normalized table.
pub const DATE: &str = "Date";

/// Candle open time as emitted by the flattener (Unix seconds).
pub const TIMESTAMP: &str = "Timestamp";
/// Opening gas price of a candle, gwei.
pub const GAS_PRICE_OPEN: &str = "GasPriceOpen";
/// Closing gas price of a candle, gwei.
pub const GAS_PRICE_CLOSE: &str = "GasPriceClose";
/// Lowest gas price of a candle, gwei.
pub const GAS_PRICE_LOW: &str = "GasPriceLow";
/// Highest gas price of a candle, gwei.
pub const GAS_PRICE_HIGH: &str = "GasPriceHigh";
/// Oracle average gas estimate, as named by the flattener.
pub const AVG_GAS: &str = "AvgGas";
/// Number of oracle samples behind a candle.
pub const SAMPLES: &str = "Samples";

/// Average gas price, as named in the unified artifact.
pub const AVERAGE_GAS_PRICE: &str = "average_gas_price";
/// Daily traded ETH volume in USD.
pub const ETH_VOLUME_USD: &str = "EthVolumeUSD";
/// Daily transaction count.
pub const TRANSACTIONS_AMOUNT: &str = "TransactionsAmount";
/// Average block size in bytes.
pub const BLOCK_SIZE: &str = "BlockSize";
/// ETH burnt per day (only exists from the London upgrade on).
pub const DAILY_ETH_BURNT: &str = "DailyEthBurnt";
/// Cumulative count of unique addresses.
pub const UNIQUE_ADDRESS_TOTAL_COUNT: &str = "UniqueAddressTotalCount";
/// Unique receiving addresses per day.
pub const UNIQUE_ADDRESS_RECEIVE_COUNT: &str = "UniqueAddressReceiveCount";
/// Unique sending addresses per day.
pub const UNIQUE_ADDRESS_SENT_COUNT: &str = "UniqueAddressSentCount";

/// Flattened candle schema, in output order.
pub const CANDLE_COLUMNS: [&str; 7] = [
    TIMESTAMP,
    GAS_PRICE_OPEN,
    GAS_PRICE_CLOSE,
    GAS_PRICE_LOW,
    GAS_PRICE_HIGH,
    AVG_GAS,
    SAMPLES,
];

/// Full column set of the persisted unified artifact, key first.
pub const UNIFIED_COLUMNS: [&str; 13] = [
    DATE,
    GAS_PRICE_OPEN,
    GAS_PRICE_CLOSE,
    GAS_PRICE_LOW,
    GAS_PRICE_HIGH,
    AVERAGE_GAS_PRICE,
    ETH_VOLUME_USD,
    TRANSACTIONS_AMOUNT,
    BLOCK_SIZE,
    DAILY_ETH_BURNT,
    UNIQUE_ADDRESS_TOTAL_COUNT,
    UNIQUE_ADDRESS_RECEIVE_COUNT,
    UNIQUE_ADDRESS_SENT_COUNT,
];

/// Artifact columns that come from left joins and may be absent.
pub const OPTIONAL_COLUMNS: [&str; 1] = [DAILY_ETH_BURNT];
