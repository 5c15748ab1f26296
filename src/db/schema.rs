/// The "coil" table: one row per manufactured coil.
pub struct CoilTable;

impl CoilTable {
    pub const TABLE_NAME: &'static str = "coil";

    pub const CREATE_TABLE: &'static str = r#"
        CREATE TABLE IF NOT EXISTS coil (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            orderPrice FLOAT NOT NULL,
            sets INTEGER NOT NULL,
            coilName VARCHAR NOT NULL,
            weight FLOAT NOT NULL,
            wireReq FLOAT NOT NULL,
            wireGauge FLOAT NOT NULL,
            delivered BOOLEAN NOT NULL DEFAULT FALSE,
            deliveredOn TIMESTAMP,
            createdAt TIMESTAMP NOT NULL
        )
    "#;
}

/// The "wire" table: wire stock intakes.
pub struct WireTable;

impl WireTable {
    pub const TABLE_NAME: &'static str = "wire";

    pub const CREATE_TABLE: &'static str = r#"
        CREATE TABLE IF NOT EXISTS wire (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            sets INTEGER NOT NULL,
            weight FLOAT NOT NULL,
            wireReq FLOAT NOT NULL,
            wireGauge FLOAT NOT NULL,
            delivered BOOLEAN NOT NULL DEFAULT FALSE,
            deliveredOn TIMESTAMP,
            createdAt TIMESTAMP NOT NULL
        )
    "#;
}

/// The "orders" table: placed customer orders.
pub struct OrdersTable;

impl OrdersTable {
    pub const TABLE_NAME: &'static str = "orders";

    pub const CREATE_TABLE: &'static str = r#"
        CREATE TABLE IF NOT EXISTS orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            coilName VARCHAR,
            sets INTEGER NOT NULL,
            weight FLOAT NOT NULL,
            wireReq FLOAT NOT NULL,
            wireGauge FLOAT NOT NULL,
            toDeliverOn TIMESTAMP,
            createdAt TIMESTAMP NOT NULL
        )
    "#;
}

/// Gauge lookups join all three tables on `wireGauge`.
pub const CREATE_INDEXES: [&str; 3] = [
    "CREATE INDEX IF NOT EXISTS idx_coil_wire_gauge ON coil (wireGauge)",
    "CREATE INDEX IF NOT EXISTS idx_wire_wire_gauge ON wire (wireGauge, delivered)",
    "CREATE INDEX IF NOT EXISTS idx_orders_wire_gauge ON orders (wireGauge)",
];
