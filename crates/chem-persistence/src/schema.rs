// Esquema Diesel compartido por SQLite y Postgres.
// Tablas: chemicals, calculations
diesel::table! {
    chemicals (id) {
        id -> Text,
        name -> Text,
        formula -> Text,
        molar_mass -> Double,
        category -> Text,
    }
}
diesel::table! {
    calculations (id) {
        id -> Text,
        chemical_id -> Nullable<Text>,
        chemical_name -> Text,
        custom_molar_mass -> Nullable<Double>,
        mass -> Double,
        volume -> Double,
        volume_unit -> Text,
        volume_in_liters -> Double,
        molar_mass -> Double,
        moles -> Double,
        molarity -> Double,
        created_at_ts -> BigInt,
    }
}
diesel::allow_tables_to_appear_in_same_query!(chemicals, calculations);
