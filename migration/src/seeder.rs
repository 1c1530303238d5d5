use entity::constants::VehicleStatus;
use entity::{inquiry, user, vehicle, vehicle_feature};
use fake::{faker, Fake};
use rand::seq::SliceRandom;
use rand::Rng;
use sea_orm_migration::sea_orm::{ActiveModelTrait, DatabaseTransaction, DbErr, Set};

const CAR_BRANDS: [&str; 8] = [
    "Toyota",
    "Volkswagen",
    "Ford",
    "Renault",
    "Fiat",
    "Hyundai",
    "Chevrolet",
    "Honda",
];

const VEHICLE_MODELS: [&str; 8] = [
    "Corolla", "Golf", "Focus", "Clio", "Argo", "HB20", "Onix", "Civic",
];

const FUEL_TYPES: [&str; 4] = ["gasoline", "diesel", "hybrid", "electric"];

const TRANSMISSIONS: [&str; 2] = ["manual", "automatic"];

const FEATURE_LABELS: [&str; 8] = [
    "air conditioning",
    "heated seats",
    "parking sensors",
    "rear view camera",
    "cruise control",
    "sunroof",
    "alloy wheels",
    "apple carplay",
];

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| String::from(default))
}

/// Creates the initial admin user, credentials are taken from the
/// `ADMIN_USERNAME` / `ADMIN_EMAIL` / `ADMIN_PASSWORD` environment
/// variables so no secret ever lives in the code or the binary
pub async fn admin_user(db: &DatabaseTransaction) -> Result<user::Model, DbErr> {
    let password = env_or("ADMIN_PASSWORD", "carlot-dev");

    let hashed = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| DbErr::Custom(format!("failed to hash admin password: {}", e)))?;

    let u = user::ActiveModel {
        username: Set(env_or("ADMIN_USERNAME", "admin")),
        email: Set(env_or("ADMIN_EMAIL", "admin@carlot.local")),
        password: Set(hashed),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(u)
}

fn fake_words(range: std::ops::Range<usize>) -> String {
    faker::lorem::en::Words(range)
        .fake::<Vec<String>>()
        .join(" ")
}

/// Creates a listing with silly but plausible data, seeded vehicles do
/// not get image rows since no files exist on the upload storage for them
pub async fn vehicle(db: &DatabaseTransaction) -> Result<vehicle::Model, DbErr> {
    let brand = CAR_BRANDS.choose(&mut rand::thread_rng()).unwrap();

    // we dont care if the model does not belong to the brand, seeded data can be silly
    let model = VEHICLE_MODELS.choose(&mut rand::thread_rng()).unwrap();

    let fuel_type = FUEL_TYPES.choose(&mut rand::thread_rng()).unwrap();
    let transmission = TRANSMISSIONS.choose(&mut rand::thread_rng()).unwrap();

    let year: i16 = rand::thread_rng().gen_range(2005..2025);
    let price: i32 = rand::thread_rng().gen_range(25_000..180_000);
    let mileage: i32 = rand::thread_rng().gen_range(0..200_000);
    let power: i16 = rand::thread_rng().gen_range(60..350);

    let v = vehicle::ActiveModel {
        brand: Set(brand.to_string()),
        model: Set(model.to_string()),
        year: Set(year),
        price: Set(price.into()),
        mileage: Set(mileage),
        fuel_type: Set(fuel_type.to_string()),
        transmission: Set(transmission.to_string()),
        power: Set(power),
        description: Set(Some(fake_words(5..12))),
        status: Set(VehicleStatus::Available.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let feature_count = rand::thread_rng().gen_range(0..4);

    let feature_labels = FEATURE_LABELS
        .choose_multiple(&mut rand::thread_rng(), feature_count)
        .collect::<Vec<_>>();
    for label in feature_labels {
        vehicle_feature::ActiveModel {
            vehicle_id: Set(v.id),
            name: Set(label.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    Ok(v)
}

pub async fn inquiry(db: &DatabaseTransaction, vehicle_id: i32) -> Result<inquiry::Model, DbErr> {
    let i = inquiry::ActiveModel {
        vehicle_id: Set(Some(vehicle_id)),
        name: Set(faker::name::en::Name().fake()),
        email: Set(faker::internet::en::FreeEmail().fake()),
        phone: Set(None),
        message: Set(fake_words(8..20)),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(i)
}
