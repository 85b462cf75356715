use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movie::Movies)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Movie::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Movie::Title).string().not_null())
                    .col(ColumnDef::new(Movie::Year).string().not_null())
                    .col(ColumnDef::new(Movie::Rating).string().not_null())
                    .col(ColumnDef::new(Movie::ThumbnailUrl).string().not_null())
                    .col(ColumnDef::new(Movie::StreamUrl).string().not_null())
                    .col(ColumnDef::new(Movie::CategoryId).uuid())
                    .col(
                        ColumnDef::new(Movie::IsTrending)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Movie::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Movie::UpdatedAt).timestamp().not_null())
                    // Deleting a category that movies still point at must fail, never cascade.
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_category")
                            .from(Movie::Movies, Movie::CategoryId)
                            .to(Category::Categories, Category::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_category_id")
                    .table(Movie::Movies)
                    .col(Movie::CategoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_is_trending")
                    .table(Movie::Movies)
                    .col(Movie::IsTrending)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Movie::Movies).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Movie {
    Movies,
    Id,
    Title,
    Year,
    Rating,
    ThumbnailUrl,
    StreamUrl,
    CategoryId,
    IsTrending,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Category {
    Categories,
    Id,
}
