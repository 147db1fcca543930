pub mod title;
pub mod youtube;

pub use title::TitleResolver;
pub use youtube::YouTubeResolver;
