use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Faction {
    Table,
    Id,
    Name,
    Image,
}

#[derive(Iden, Clone)]
pub enum Hero {
    Table,
    Id,
    Name,
    Description,
    Image,
    FactionId,
}

#[derive(Iden, Clone)]
pub enum User {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Suggestion {
    Table,
    Id,
    Title,
    Content,
    UserId,
    Status,
    CreatedAt,
}
