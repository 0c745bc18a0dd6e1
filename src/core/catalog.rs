use crate::domain::model::Destination;

/// Built-in catalog served when no seed file is given.
pub fn default_destinations() -> Vec<Destination> {
    vec![
        Destination::new(1, "Paris")
            .with_field("country", "France")
            .with_field("description", "Museums, cafés and the banks of the Seine"),
        Destination::new(2, "Kyoto")
            .with_field("country", "Japan")
            .with_field("description", "Temples, gardens and traditional tea houses"),
        Destination::new(3, "Marrakech")
            .with_field("country", "Morocco")
            .with_field("description", "Souks, riads and the Atlas mountains nearby"),
    ]
}
