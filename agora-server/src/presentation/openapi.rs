use utoipa::OpenApi;

use crate::presentation::envelope::MessageBody;
use crate::presentation::handlers::posts::{
    CommentDto, CreateCommentDto, CreatePostDto, CreatedCommentDto, LikeDto, PostDetailDto,
    PostDto, PostSummaryDto, UpdatePostDto,
};
use crate::presentation::handlers::products::{
    CreateProductDto, ProductDto, ProductWithOwnerDto, UpdateProductDto,
};
use crate::presentation::handlers::users::{
    AccountDto, LoginDto, SignupDto, UpdateUserDto, UserDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::users::list_users,
        crate::presentation::handlers::users::signup,
        crate::presentation::handlers::users::login,
        crate::presentation::handlers::users::get_user,
        crate::presentation::handlers::users::update_user,
        crate::presentation::handlers::users::delete_user,
        crate::presentation::handlers::products::create_product,
        crate::presentation::handlers::products::list_products,
        crate::presentation::handlers::products::get_product,
        crate::presentation::handlers::products::update_product,
        crate::presentation::handlers::products::delete_product,
        crate::presentation::handlers::posts::create_post,
        crate::presentation::handlers::posts::list_posts,
        crate::presentation::handlers::posts::get_post,
        crate::presentation::handlers::posts::update_post,
        crate::presentation::handlers::posts::delete_post,
        crate::presentation::handlers::posts::toggle_like,
        crate::presentation::handlers::posts::create_comment
    ),
    components(
        schemas(
            SignupDto,
            LoginDto,
            UpdateUserDto,
            UserDto,
            AccountDto,
            CreateProductDto,
            UpdateProductDto,
            ProductDto,
            ProductWithOwnerDto,
            CreatePostDto,
            UpdatePostDto,
            LikeDto,
            CreateCommentDto,
            PostDto,
            PostSummaryDto,
            PostDetailDto,
            CommentDto,
            CreatedCommentDto,
            MessageBody
        )
    ),
    tags(
        (name = "users", description = "User accounts, signup and login"),
        (name = "products", description = "Product listings"),
        (name = "posts", description = "Posts, likes and comments")
    )
)]
pub(crate) struct ApiDoc;
