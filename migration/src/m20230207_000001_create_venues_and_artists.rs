use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Venues::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Venues::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Venues::Name).string().not_null())
                    .col(ColumnDef::new(Venues::City).string_len(120).not_null())
                    .col(ColumnDef::new(Venues::State).string_len(120).not_null())
                    .col(ColumnDef::new(Venues::Address).string_len(120).not_null())
                    .col(ColumnDef::new(Venues::Phone).string_len(120).not_null())
                    .col(ColumnDef::new(Venues::ImageLink).string_len(500).not_null())
                    .col(ColumnDef::new(Venues::WebsiteLink).string_len(240))
                    .col(ColumnDef::new(Venues::FacebookLink).string_len(240))
                    // Comma-joined genre names
                    .col(ColumnDef::new(Venues::Genres).string_len(120).not_null())
                    .col(
                        ColumnDef::new(Venues::Seeking)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Venues::SeekingComment).string_len(500))
                    .col(ColumnDef::new(Venues::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Venues::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Artists::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Artists::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Artists::Name).string().not_null())
                    .col(ColumnDef::new(Artists::City).string_len(120).not_null())
                    .col(ColumnDef::new(Artists::State).string_len(120).not_null())
                    .col(ColumnDef::new(Artists::Phone).string_len(120).not_null())
                    .col(ColumnDef::new(Artists::ImageLink).string_len(500).not_null())
                    .col(ColumnDef::new(Artists::WebsiteLink).string_len(240))
                    .col(ColumnDef::new(Artists::FacebookLink).string_len(240))
                    .col(ColumnDef::new(Artists::Genres).string_len(120).not_null())
                    .col(
                        ColumnDef::new(Artists::Seeking)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Artists::SeekingComment).string_len(500))
                    .col(ColumnDef::new(Artists::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Artists::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_venues_city_state")
                    .table(Venues::Table)
                    .col(Venues::City)
                    .col(Venues::State)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Artists::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Venues::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Venues {
    Table,
    Id,
    Name,
    City,
    State,
    Address,
    Phone,
    ImageLink,
    WebsiteLink,
    FacebookLink,
    Genres,
    Seeking,
    SeekingComment,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Artists {
    Table,
    Id,
    Name,
    City,
    State,
    Phone,
    ImageLink,
    WebsiteLink,
    FacebookLink,
    Genres,
    Seeking,
    SeekingComment,
    CreatedAt,
    UpdatedAt,
}
