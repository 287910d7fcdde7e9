/// Product name drawn from a category's product list.
/// Examples: `Laptop`, `Coffee Maker`, `Children's Book`
pub type ProductName = String;
/// Rendered category label.
/// Examples: `Electronics`, `Home & Kitchen`
pub type CategoryLabel = String;
/// Rendered group key used by summary tables.
/// Examples: `Books`, `Unknown`, `Yoga Mat`
pub type GroupKey = String;
/// Rendered numeric column name.
/// Examples: `Quantity`, `Unit_Price`, `Sales`, `Quarter`
pub type ColumnName = &'static str;
/// Components used to build table fingerprints.
/// Example: `2022-03-14|Books|Novel|North|2|123.450000|246.900000`
pub type HashPart = String;
