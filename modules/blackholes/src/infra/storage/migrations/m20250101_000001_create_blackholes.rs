use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BlackHoles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BlackHoles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BlackHoles::Name).string_len(200).not_null())
                    .col(ColumnDef::new(BlackHoles::DistanceLy).double().null())
                    .col(ColumnDef::new(BlackHoles::MassSolar).double().null())
                    .col(ColumnDef::new(BlackHoles::Description).string_len(2000).null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("ix_blackholes_name")
                    .table(BlackHoles::Table)
                    .col(BlackHoles::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlackHoles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BlackHoles {
    #[sea_orm(iden = "blackholes")]
    Table,
    Id,
    Name,
    DistanceLy,
    MassSolar,
    Description,
}
