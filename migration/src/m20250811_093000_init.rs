use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        let statement = r#"
        create table "user" (
            "id" serial primary key,
            "created_at" timestamptz(0) not null default now(),
            "username" varchar(255) not null,
            "email" varchar(255) not null,
            "password" varchar(255) not null
        );

        alter table
            "user"
        add
            constraint "user_email_unique" unique ("email");

        alter table
            "user"
        add
            constraint "user_username_unique" unique ("username");

        create table "session" (
            "public_id" serial unique,
            "session_token" BYTEA PRIMARY KEY,
            "created_at" timestamptz(0) not null default now(),
            "expires_at" timestamptz(0) not null,
            "user_agent" varchar(255) not null,
            "ip" INET not null,
            "user_id" int not null REFERENCES "user" (id) ON DELETE CASCADE
        );

        create table "vehicle" (
            "id" serial primary key,
            "created_at" timestamptz(0) not null default now(),
            "updated_at" timestamptz(0) not null default now(),
            "brand" varchar(255) not null,
            "model" varchar(255) not null,
            "year" smallint not null,
            "price" numeric(12, 2) not null,
            "mileage" int not null,
            "fuel_type" varchar(32) not null,
            "transmission" varchar(32) not null,
            "power" smallint not null,
            "description" text null,
            "status" varchar(32) not null default 'available'
        );

        create table "vehicle_feature" (
            "id" serial primary key,
            "vehicle_id" int not null,
            "name" varchar(255) not null
        );

        alter table
            "vehicle_feature"
        add
            constraint "vehicle_feature_vehicle_id_foreign" foreign key ("vehicle_id") references "vehicle" ("id") on update cascade on delete cascade;

        create table "vehicle_image" (
            "id" serial primary key,
            "vehicle_id" int not null,
            "path" varchar(255) not null,
            "sort_order" int not null default 0
        );

        alter table
            "vehicle_image"
        add
            constraint "vehicle_image_vehicle_id_foreign" foreign key ("vehicle_id") references "vehicle" ("id") on update cascade on delete cascade;

        create table "inquiry" (
            "id" serial primary key,
            "created_at" timestamptz(0) not null default now(),
            "updated_at" timestamptz(0) not null default now(),
            "vehicle_id" int null,
            "name" varchar(255) not null,
            "email" varchar(255) not null,
            "phone" varchar(32) null,
            "message" text not null,
            "status" varchar(32) not null default 'new'
        );

        alter table
            "inquiry"
        add
            constraint "inquiry_vehicle_id_foreign" foreign key ("vehicle_id") references "vehicle" ("id") on update cascade on delete
        set
            null;
        "#;

        db.execute_unprepared(statement).await?;

        Ok(())
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        Err(DbErr::Custom(String::from("cannot be reverted")))
    }
}
