mod category_dto;

pub use category_dto::{
    CategoryDetailDto, CategoryResponseDto, CategoryTreeDto, CreateCategoryDto,
    DeleteCategoryQuery, ListCategoriesQuery, ParentChange, PostCountDto, SearchCategoriesQuery,
    UpdateCategoryDto,
};
